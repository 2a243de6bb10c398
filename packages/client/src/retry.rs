//! HTTP retry helpers for transient errors.
//!
//! Every request [`crate::ApiClient`] makes goes through [`send_json`],
//! which retries connection failures, timeouts, HTTP 429, and HTTP 5xx
//! with exponential backoff. Other 4xx responses are permanent. Incident
//! submission passes [`RetryPolicy::none`] so a POST is sent once.
//!
//! ```ignore
//! let body: ResourcesEnvelope = retry::send_json(&policy, || client.get(&url)).await?;
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::ClientError;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three retries at 500ms, 1s, 2s.
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor)
    }
}

/// What to do with a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 2xx/3xx: hand the response to the caller.
    Accept,
    /// 429/5xx: try again.
    Retry,
    /// Other 4xx: give up.
    Fail,
}

/// Classifies a response status.
#[must_use]
pub fn classify(status: reqwest::StatusCode) -> Disposition {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Disposition::Retry
    } else if status.is_client_error() {
        Disposition::Fail
    } else {
        Disposition::Accept
    }
}

/// Sends an HTTP request and decodes the response body as `T`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`ClientError`] if the request fails after all retries, the
/// server returns a non-retryable status code, or the body does not
/// decode as `T`.
pub async fn send_json<T, F>(policy: &RetryPolicy, build_request: F) -> Result<T, ClientError>
where
    T: DeserializeOwned,
    F: Fn() -> reqwest::RequestBuilder + Send + Sync,
{
    let response = send_inner(policy, &build_request).await?;
    let url = response.url().to_string();
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        let preview = text.chars().take(BODY_PREVIEW_LEN).collect::<String>();
        log::error!("Failed to decode response from {url}: {e}\n  body preview: {preview}");
        ClientError::Json(e)
    })
}

/// Core retry loop. Returns the first response with an accepted status.
async fn send_inner<F>(
    policy: &RetryPolicy,
    build_request: &F,
) -> Result<reqwest::Response, ClientError>
where
    F: Fn() -> reqwest::RequestBuilder + Send + Sync,
{
    let max_retries = policy.max_retries;
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay(attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let error = match build_request().send().await {
            Err(e) => {
                if !is_transient(&e) {
                    return Err(ClientError::Http(e));
                }
                log::warn!("  transient error: {e}");
                ClientError::Http(e)
            }
            Ok(response) => {
                let status = response.status();
                match classify(status) {
                    Disposition::Accept => return Ok(response),
                    Disposition::Fail => {
                        return Err(ClientError::Status {
                            status: status.as_u16(),
                            url: response.url().to_string(),
                        });
                    }
                    Disposition::Retry => {
                        log::warn!("  HTTP {status} from {}", response.url());
                        ClientError::Status {
                            status: status.as_u16(),
                            url: response.url().to_string(),
                        }
                    }
                }
            }
        };

        if attempt >= max_retries {
            log::error!("Giving up after {max_retries} retries: {error}");
            return Err(error);
        }
        attempt += 1;
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
pub(crate) fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}
