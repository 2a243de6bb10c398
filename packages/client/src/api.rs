//! REST client for the remote emergency backend.

use std::time::Duration;

use async_trait::async_trait;
use emergency_map_models::{Incident, OutageZone, Resource, ResourceCategory, Statistics};
use serde::Deserialize;

use crate::retry::{self, RetryPolicy};
use crate::{ClientError, DataSource, HealthStatus};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct ResourcesEnvelope {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Deserialize)]
struct IncidentsEnvelope {
    #[serde(default)]
    incidents: Vec<Incident>,
}

#[derive(Deserialize)]
struct OutagesEnvelope {
    #[serde(default)]
    outages: Vec<OutageZone>,
}

/// Client for the backend's `/api` routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url` (without the `/api`
    /// suffix) using the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an
    /// `http(s)` URL, or [`ClientError::Http`] if the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    /// Creates a client with an explicit retry policy.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn with_retry(base_url: &str, retry: RetryPolicy) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let base_url = base_url.strip_suffix("/api").unwrap_or(base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            client,
            retry,
        })
    }

    /// Backend base URL, without the `/api` suffix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    /// URL of one resource, with `id` percent-encoded as a single path
    /// segment.
    fn resource_url(&self, id: &str) -> Result<reqwest::Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = reqwest::Url::parse(&self.url("resources")).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(id);
        Ok(url)
    }
}

#[async_trait]
impl DataSource for ApiClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_resources(
        &self,
        category: Option<ResourceCategory>,
    ) -> Result<Vec<Resource>, ClientError> {
        let url = self.url("resources");
        let body: ResourcesEnvelope = retry::send_json(&self.retry, || {
            let request = self.client.get(&url);
            match category {
                Some(category) => request.query(&[("type", category.as_ref())]),
                None => request,
            }
        })
        .await?;
        log::debug!("Fetched {} resources from {url}", body.resources.len());
        Ok(body.resources)
    }

    async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>, ClientError> {
        let url = self.resource_url(id)?;
        match retry::send_json(&self.retry, || self.client.get(url.clone())).await {
            Ok(resource) => Ok(Some(resource)),
            Err(ClientError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fetch_incidents(&self) -> Result<Vec<Incident>, ClientError> {
        let url = self.url("incidents");
        let body: IncidentsEnvelope =
            retry::send_json(&self.retry, || self.client.get(&url)).await?;
        log::debug!("Fetched {} incidents from {url}", body.incidents.len());
        Ok(body.incidents)
    }

    async fn fetch_outages(&self) -> Result<Vec<OutageZone>, ClientError> {
        let url = self.url("power-outages");
        let body: OutagesEnvelope = retry::send_json(&self.retry, || self.client.get(&url)).await?;
        log::debug!("Fetched {} outages from {url}", body.outages.len());
        Ok(body.outages)
    }

    async fn fetch_statistics(&self) -> Result<Statistics, ClientError> {
        let url = self.url("statistics");
        retry::send_json(&self.retry, || self.client.get(&url)).await
    }

    /// Sent once. A retried POST could store the incident twice when only
    /// the response was lost.
    async fn submit_incident(&self, incident: &Incident) -> Result<Incident, ClientError> {
        let url = self.url("incidents");
        let stored: Incident =
            retry::send_json(&RetryPolicy::none(), || self.client.post(&url).json(incident))
                .await?;
        log::info!("Submitted incident {} (stored as {})", incident.id, stored.id);
        Ok(stored)
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url("health");
        retry::send_json(&self.retry, || self.client.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use actix_web::{App, HttpResponse, HttpServer, web};
    use chrono::Utc;
    use emergency_map_models::{Coordinate, IncidentStatus, IncidentType, Priority};

    use super::*;

    #[derive(Default)]
    struct Hits {
        statistics: AtomicUsize,
        incidents: AtomicUsize,
        posts: AtomicUsize,
        fail_next_post: AtomicBool,
    }

    async fn resources(
        query: web::Query<std::collections::HashMap<String, String>>,
    ) -> HttpResponse {
        let all = serde_json::json!([
            {"id": "gen-1", "name": "Gen", "name_he": "גנרטור", "type": "generator", "lat": 32.0, "lng": 34.8},
            {"id": "med-1", "name": "Med", "name_he": "רפואה", "type": "medical", "lat": 32.1, "lng": 34.8},
        ]);
        let resources: Vec<_> = all
            .as_array()
            .into_iter()
            .flatten()
            .filter(|r| query.get("type").is_none_or(|t| r["type"] == t.as_str()))
            .cloned()
            .collect();
        HttpResponse::Ok().json(serde_json::json!({ "resources": resources }))
    }

    async fn statistics(hits: web::Data<Hits>) -> HttpResponse {
        if hits.statistics.fetch_add(1, Ordering::SeqCst) == 0 {
            return HttpResponse::ServiceUnavailable().finish();
        }
        HttpResponse::Ok().json(serde_json::json!({
            "total_resources": 25,
            "active_resources": 24,
            "open_incidents": 1,
            "active_outages": 2,
        }))
    }

    async fn incidents(hits: web::Data<Hits>) -> HttpResponse {
        hits.incidents.fetch_add(1, Ordering::SeqCst);
        HttpResponse::NotFound().finish()
    }

    async fn create_incident(
        hits: web::Data<Hits>,
        body: web::Json<serde_json::Value>,
    ) -> HttpResponse {
        hits.posts.fetch_add(1, Ordering::SeqCst);
        if hits.fail_next_post.swap(false, Ordering::SeqCst) {
            return HttpResponse::ServiceUnavailable().finish();
        }
        let mut stored = body.into_inner();
        stored["id"] = serde_json::Value::from("server-assigned");
        HttpResponse::Ok().json(stored)
    }

    async fn resource(path: web::Path<String>) -> HttpResponse {
        if path.as_str() == "gen-1" {
            HttpResponse::Ok().json(serde_json::json!(
                {"id": "gen-1", "name": "Gen", "name_he": "גנרטור", "type": "generator", "lat": 32.0, "lng": 34.8}
            ))
        } else {
            HttpResponse::NotFound().finish()
        }
    }

    async fn start_backend() -> (ApiClient, web::Data<Hits>, actix_web::dev::ServerHandle) {
        let hits = web::Data::new(Hits::default());
        let data = hits.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/api/resources", web::get().to(resources))
                .route("/api/resources/{id}", web::get().to(resource))
                .route("/api/statistics", web::get().to(statistics))
                .route("/api/incidents", web::get().to(incidents))
                .route("/api/incidents", web::post().to(create_incident))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        };
        let client = ApiClient::with_retry(&format!("http://{addr}/api/"), policy).unwrap();
        (client, hits, handle)
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            ApiClient::new("ftp://example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
        let client = ApiClient::new("http://localhost:8001/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001");
    }

    #[actix_web::test]
    async fn fetches_resources_with_category_filter() {
        let (client, _, handle) = start_backend().await;

        let all = client.fetch_resources(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let medical = client
            .fetch_resources(Some(ResourceCategory::Medical))
            .await
            .unwrap();
        assert_eq!(medical.len(), 1);
        assert_eq!(medical[0].id, "med-1");

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn missing_resource_is_none() {
        let (client, _, handle) = start_backend().await;
        assert!(client.fetch_resource("gen-1").await.unwrap().is_some());
        assert!(client.fetch_resource("nope").await.unwrap().is_none());
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn retries_server_errors() {
        let (client, hits, handle) = start_backend().await;
        let stats = client.fetch_statistics().await.unwrap();
        assert_eq!(stats.total_resources, 25);
        assert_eq!(hits.statistics.load(Ordering::SeqCst), 2);
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn client_errors_are_not_retried() {
        let (client, hits, handle) = start_backend().await;
        let err = client.fetch_incidents().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404, .. }));
        assert!(!err.is_transient());
        assert_eq!(hits.incidents.load(Ordering::SeqCst), 1);
        handle.stop(false).await;
    }

    fn fire() -> Incident {
        Incident {
            id: "local".to_string(),
            title: String::new(),
            title_he: "שריפה".to_string(),
            description: String::new(),
            description_he: "שריפה בבניין".to_string(),
            kind: IncidentType::Fire,
            location: Coordinate::new(32.08, 34.78),
            status: IncidentStatus::Open,
            priority: Priority::Medium,
            reported_by: "anonymous".to_string(),
            reported_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn submit_returns_stored_record() {
        let (client, _, handle) = start_backend().await;
        let stored = client.submit_incident(&fire()).await.unwrap();
        assert_eq!(stored.id, "server-assigned");
        assert_eq!(stored.title_he, "שריפה");
        assert_eq!(stored.kind, IncidentType::Fire);
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn submit_is_not_retried() {
        let (client, hits, handle) = start_backend().await;
        hits.fail_next_post.store(true, Ordering::SeqCst);

        let err = client.submit_incident(&fire()).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 503, .. }));
        assert_eq!(hits.posts.load(Ordering::SeqCst), 1);
        handle.stop(false).await;
    }

    #[test]
    fn resource_id_is_one_encoded_segment() {
        let client = ApiClient::new("http://localhost:8001").unwrap();
        let url = client.resource_url("a/b?c#d").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api/resources/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }
}
