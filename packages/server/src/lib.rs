#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web view server for the emergency map dashboard.
//!
//! Serves the dashboard's view-models as JSON, the map layer as GeoJSON,
//! and the intake form actions under `/api`, plus the static frontend
//! files when the configured directory exists.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use emergency_map_dashboard::{Dashboard, DashboardConfig};

/// Shared application state.
pub struct AppState {
    /// The dashboard session every request reads from.
    pub dashboard: Arc<Dashboard>,
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/view", web::get().to(handlers::view))
            .route("/categories", web::get().to(handlers::categories))
            .route("/filter", web::post().to(handlers::select_filter))
            .route("/resources", web::get().to(handlers::resources))
            .route("/resources/{id}", web::get().to(handlers::resource))
            .route("/statistics", web::get().to(handlers::statistics))
            .route("/map", web::get().to(handlers::map))
            .route("/refresh", web::post().to(handlers::refresh))
            .route("/intake", web::get().to(handlers::intake))
            .route("/intake/open", web::post().to(handlers::open_intake))
            .route("/intake/cancel", web::post().to(handlers::cancel_intake))
            .route("/incidents", web::get().to(handlers::incidents))
            .route("/incidents", web::post().to(handlers::submit_incident)),
    );
}

/// Starts the view server.
///
/// Builds the dashboard from `config`, performs the initial load, and
/// serves until shut down. A failed initial load is logged and the server
/// starts anyway with whatever the snapshot provided. This is a regular
/// async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dashboard cannot be built,
/// or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> std::io::Result<()> {
    let dashboard = Dashboard::from_config(&config).map_err(std::io::Error::other)?;

    log::info!("Loading dashboard data...");
    match dashboard.load().await {
        Ok(report) => log::info!(
            "Loaded {} resources (revision {})",
            report.statistics.total_resources,
            report.revision
        ),
        Err(e) => log::warn!("Initial load failed, serving local data: {e}"),
    }

    let state = web::Data::new(AppState {
        dashboard: Arc::new(dashboard),
    });

    let server = config.server;
    let static_dir = server.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::info!(
            "Static directory {} not found, serving API only",
            static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", server.bind_addr, server.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        // Serve frontend static files (production)
        if serve_static {
            app.service(Files::new("/", static_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((server.bind_addr.as_str(), server.port))?
    .run()
    .await
}
