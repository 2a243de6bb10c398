#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data sources for the emergency map.
//!
//! Every source implements the [`DataSource`] trait. [`ApiClient`] talks
//! to the remote REST backend with bounded retry; [`StaticSource`] serves
//! the bundled seed data for offline demo mode.

pub mod api;
pub mod retry;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emergency_map_models::{Incident, OutageZone, Resource, ResourceCategory, Statistics};
use serde::{Deserialize, Serialize};

pub use api::ApiClient;
pub use retry::RetryPolicy;
pub use seed::StaticSource;

/// Errors that can occur while talking to a data source.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response or seed body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The base URL is not usable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Returns `true` for errors worth retrying later (connection
    /// failures, timeouts, rate limiting, server errors).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => retry::is_transient(e),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Json(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the backend is up.
    pub status: String,
    /// Server time of the check.
    #[serde(default, with = "emergency_map_models::wire::timestamp::option")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl HealthStatus {
    /// A healthy report stamped with the current time.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Some(Utc::now()),
        }
    }

    /// Returns `true` when the backend reported itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Where the dashboard gets its data.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Fetches resources, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails.
    async fn fetch_resources(
        &self,
        category: Option<ResourceCategory>,
    ) -> Result<Vec<Resource>, ClientError>;

    /// Fetches a single resource, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails.
    async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>, ClientError>;

    /// Fetches all incidents.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails.
    async fn fetch_incidents(&self) -> Result<Vec<Incident>, ClientError>;

    /// Fetches all power outage zones.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails.
    async fn fetch_outages(&self) -> Result<Vec<OutageZone>, ClientError>;

    /// Fetches the source's own statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails.
    async fn fetch_statistics(&self) -> Result<Statistics, ClientError>;

    /// Submits a new incident and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the submission fails.
    async fn submit_incident(&self, incident: &Incident) -> Result<Incident, ClientError>;

    /// Checks that the source is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the source cannot be reached.
    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_classify_by_code() {
        let status = |status| ClientError::Status {
            status,
            url: "http://x".to_string(),
        };
        assert!(status(503).is_transient());
        assert!(status(429).is_transient());
        assert!(!status(404).is_transient());
        assert!(!ClientError::InvalidUrl(String::new()).is_transient());
    }

    #[test]
    fn health_parses_naive_timestamp() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","timestamp":"2025-03-15T10:00:00.123456"}"#)
                .unwrap();
        assert!(health.is_healthy());
        assert!(health.timestamp.is_some());
    }
}
