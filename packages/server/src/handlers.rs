//! HTTP handler functions for the emergency map view server.

use actix_web::{HttpResponse, http::header, web};
use emergency_map_dashboard::{DashboardError, IncidentDraft};
use emergency_map_models::Locale;
use emergency_map_server_models::{
    ApiCategory, ApiError, ApiHealth, ApiRefresh, ResourceQueryParams, ViewQueryParams,
};
use emergency_map_store::CategoryFilter;
use emergency_map_store::filter::filter_options;

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let dashboard = &state.dashboard;
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: dashboard.source_name().to_string(),
        loading: dashboard.is_loading(),
        revision: dashboard.revision(),
    })
}

/// `GET /api/view`
///
/// Returns the composed dashboard view for an optional category and
/// locale.
pub async fn view(state: web::Data<AppState>, params: web::Query<ViewQueryParams>) -> HttpResponse {
    let (filter, locale) = match parse_view_params(&params) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    HttpResponse::Ok().json(state.dashboard.view(filter, locale))
}

/// `GET /api/categories`
///
/// Lists the filter options with the number of resources each matches.
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    let selected = state.dashboard.selected_category();
    let categories: Vec<ApiCategory> = filter_options()
        .into_iter()
        .map(|option| ApiCategory {
            value: option.value.to_string(),
            label: option.label.to_string(),
            label_en: option.label_en.to_string(),
            count: state.dashboard.resources(option.value).len(),
            selected: option.value == selected,
        })
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `POST /api/filter`
///
/// Sets the dashboard's selected category from `?category=`.
pub async fn select_filter(
    state: web::Data<AppState>,
    params: web::Query<ResourceQueryParams>,
) -> HttpResponse {
    match parse_filter(params.category.as_deref()) {
        Ok(filter) => {
            let filter = filter.unwrap_or_default();
            state.dashboard.select_category(filter);
            HttpResponse::Ok().json(serde_json::json!({ "category": filter }))
        }
        Err(response) => response,
    }
}

/// `GET /api/resources`
pub async fn resources(
    state: web::Data<AppState>,
    params: web::Query<ResourceQueryParams>,
) -> HttpResponse {
    match parse_filter(params.category.as_deref()) {
        Ok(filter) => {
            let resources = state.dashboard.resources(filter.unwrap_or_default());
            HttpResponse::Ok().json(serde_json::json!({ "resources": resources }))
        }
        Err(response) => response,
    }
}

/// `GET /api/resources/{id}`
pub async fn resource(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.dashboard.resource(&path) {
        Some(resource) => HttpResponse::Ok().json(resource),
        None => HttpResponse::NotFound().json(ApiError::new("Resource not found")),
    }
}

/// `GET /api/statistics`
pub async fn statistics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.statistics())
}

/// `GET /api/map`
///
/// Returns the map layer as a GeoJSON `FeatureCollection`.
pub async fn map(state: web::Data<AppState>, params: web::Query<ViewQueryParams>) -> HttpResponse {
    let (filter, locale) = match parse_view_params(&params) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    let dashboard = &state.dashboard;
    let layer = dashboard.layer(
        filter.unwrap_or_else(|| dashboard.selected_category()),
        locale.unwrap_or(dashboard.format_options().locale),
    );

    match serde_json::to_string(&layer.to_feature_collection()) {
        Ok(body) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "application/geo+json"))
            .body(body),
        Err(e) => {
            log::error!("Failed to serialize map layer: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to render map"))
        }
    }
}

/// `POST /api/refresh`
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    match state.dashboard.refresh().await {
        Ok(report) => HttpResponse::Ok().json(ApiRefresh {
            revision: report.revision,
            statistics: report.statistics,
            incidents_from_snapshot: report.incidents_from_snapshot,
        }),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/intake`
pub async fn intake(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.intake())
}

/// `POST /api/intake/open`
pub async fn open_intake(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.open_intake())
}

/// `POST /api/intake/cancel`
pub async fn cancel_intake(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.cancel_intake())
}

/// `GET /api/incidents`
pub async fn incidents(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "incidents": state.dashboard.incidents() }))
}

/// `POST /api/incidents`
///
/// Submits a draft. The stored incident is returned with `201 Created`.
pub async fn submit_incident(
    state: web::Data<AppState>,
    draft: web::Json<IncidentDraft>,
) -> HttpResponse {
    match state.dashboard.submit_draft(draft.into_inner()).await {
        Ok(incident) => HttpResponse::Created().json(incident),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &DashboardError) -> HttpResponse {
    let body = ApiError::new(e.to_string());
    match e {
        DashboardError::Busy => HttpResponse::Conflict().json(body),
        DashboardError::Intake(_) => HttpResponse::UnprocessableEntity().json(body),
        DashboardError::Client(_) => HttpResponse::BadGateway().json(body),
        DashboardError::Config(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn parse_filter(raw: Option<&str>) -> Result<Option<CategoryFilter>, HttpResponse> {
    raw.map(str::parse::<CategoryFilter>)
        .transpose()
        .map_err(|e| HttpResponse::BadRequest().json(ApiError::new(e.to_string())))
}

fn parse_locale(raw: Option<&str>) -> Result<Option<Locale>, HttpResponse> {
    raw.map(|s| {
        s.trim().parse::<Locale>().map_err(|_| {
            HttpResponse::BadRequest().json(ApiError::new(format!("unknown locale: {s}")))
        })
    })
    .transpose()
}

fn parse_view_params(
    params: &ViewQueryParams,
) -> Result<(Option<CategoryFilter>, Option<Locale>), HttpResponse> {
    Ok((
        parse_filter(params.category.as_deref())?,
        parse_locale(params.locale.as_deref())?,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use emergency_map_annotation::FormatOptions;
    use emergency_map_client::StaticSource;
    use emergency_map_dashboard::Dashboard;
    use emergency_map_store::snapshot::InMemorySnapshot;

    use crate::{AppState, configure_api};

    async fn state() -> web::Data<AppState> {
        let dashboard = Dashboard::new(
            Arc::new(StaticSource::seeded().unwrap()),
            Arc::new(InMemorySnapshot::default()),
            FormatOptions::default(),
        );
        dashboard.load().await.unwrap();
        web::Data::new(AppState {
            dashboard: Arc::new(dashboard),
        })
    }

    #[actix_web::test]
    async fn health_reports_revision() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["revision"], 1);
    }

    #[actix_web::test]
    async fn view_filters_by_category() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/view?category=medical&locale=en")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["map"]["shown"], 5);
        assert_eq!(body["map"]["total"], 25);
        assert_eq!(body["filter"]["selected"], "medical");
        assert_eq!(body["header"]["title"], "Israel Emergency Platform");
        assert_eq!(body["statistics"]["total_resources"], 25);
        assert_eq!(body["intake"]["submit_label"], "Submit Report");
        assert_eq!(body["intake"]["open"], false);
    }

    #[actix_web::test]
    async fn unknown_category_is_bad_request() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/resources?category=helipad")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn categories_carry_counts() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/categories").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["value"], "all");
        assert_eq!(body[0]["count"], 25);
        assert_eq!(body[0]["selected"], true);
        assert_eq!(body[2]["value"], "medical");
        assert_eq!(body[2]["count"], 5);
    }

    #[actix_web::test]
    async fn map_is_geojson() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/map?category=water")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/geo+json"
        );
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "FeatureCollection");
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 2 + 3);
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
    }

    #[actix_web::test]
    async fn submit_incident_round_trip() {
        let state = state().await;
        let app = test::init_service(
            App::new().app_data(state.clone()).configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/incidents")
            .set_json(serde_json::json!({
                "title_he": "שריפה",
                "description_he": "שריפה בבניין",
                "type": "fire",
                "lat": 32.08,
                "lng": 34.78,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let stored: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(stored["status"], "open");
        assert_eq!(stored["priority"], "medium");
        assert_eq!(stored["reported_by"], "anonymous");

        let req = test::TestRequest::get().uri("/api/statistics").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["open_incidents"], 1);

        let req = test::TestRequest::get().uri("/api/incidents").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["incidents"][0]["id"], stored["id"]);
    }

    #[actix_web::test]
    async fn invalid_draft_is_unprocessable() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/incidents")
            .set_json(serde_json::json!({ "title_he": "", "lat": 32.0, "lng": 34.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);

        let req = test::TestRequest::get().uri("/api/intake").to_request();
        let form: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form["open"], true);
        assert!(form["error"].is_string());
    }

    #[actix_web::test]
    async fn intake_open_and_cancel() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::post().uri("/api/intake/open").to_request();
        let form: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form["open"], true);
        assert_eq!(form["draft"]["type"], "other");

        let req = test::TestRequest::post().uri("/api/intake/cancel").to_request();
        let form: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form["open"], false);
    }

    #[actix_web::test]
    async fn refresh_bumps_revision() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::post().uri("/api/refresh").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["revision"], 2);
        assert_eq!(body["statistics"]["active_outages"], 2);
    }

    #[actix_web::test]
    async fn missing_resource_is_not_found() {
        let app = test::init_service(
            App::new().app_data(state().await).configure(configure_api),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/resources/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::get().uri("/api/resources/gen-1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
