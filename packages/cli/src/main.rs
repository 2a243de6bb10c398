#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the emergency map dashboard.
//!
//! ```text
//! emergency_map_cli stats
//! emergency_map_cli list [--category medical] [--grouped]
//! emergency_map_cli map [--category water] [--output layer.geojson]
//! emergency_map_cli report --title-he <...> --description-he <...> --lat <..> --lng <..>
//! emergency_map_cli serve
//! ```
//!
//! Running with no subcommand enters interactive mode.

mod interactive;
mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use emergency_map_dashboard::{Dashboard, DashboardConfig, IncidentDraft};
use emergency_map_models::{Coordinate, IncidentType, Locale};
use emergency_map_store::CategoryFilter;

#[derive(Parser)]
#[command(
    name = "emergency_map_cli",
    about = "Query and report to the emergency resources map"
)]
struct Cli {
    /// TOML config file. Falls back to `EMERGENCY_MAP_CONFIG`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use bundled seed data instead of the backend
    #[arg(long, global = true)]
    offline: bool,

    /// Output language (`he` or `en`)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show resource, incident, and outage counts
    Stats,
    /// List resources
    List {
        /// Only this category (`all`, `generator`, `medical`, ...)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Group by category
        #[arg(long)]
        grouped: bool,
    },
    /// Export the map layer as GeoJSON
    Map {
        /// Only resources of this category
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Report an incident
    Report {
        /// Hebrew title
        #[arg(long)]
        title_he: String,
        /// Hebrew description
        #[arg(long)]
        description_he: String,
        /// English title
        #[arg(long, default_value = "")]
        title: String,
        /// English description
        #[arg(long, default_value = "")]
        description: String,
        /// Incident type (`fire`, `medical`, `evacuation`, `power`, `other`)
        #[arg(long = "type", default_value = "other")]
        kind: IncidentType,
        /// Latitude
        #[arg(long)]
        lat: f64,
        /// Longitude
        #[arg(long)]
        lng: f64,
        /// Reporter name
        #[arg(long)]
        reported_by: Option<String>,
    },
    /// Start the view server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let path = cli
        .config
        .or_else(|| std::env::var_os("EMERGENCY_MAP_CONFIG").map(PathBuf::from));
    let mut config = DashboardConfig::load(path.as_deref())?;
    if cli.offline {
        config.offline = true;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let Some(command) = cli.command else {
        return interactive::run(config).await;
    };

    let locale = config.locale;

    match command {
        Commands::Stats => {
            let dashboard = open(&config).await?;
            print!("{}", render::statistics(dashboard.statistics(), locale));
        }
        Commands::List { category, grouped } => {
            let resources = open(&config).await?.resources(category);
            print!("{}", render::resource_list(&resources, locale, grouped));
        }
        Commands::Map { category, output } => {
            let dashboard = open(&config).await?;
            export_map(&dashboard, category, locale, output.as_deref())?;
        }
        Commands::Report {
            title_he,
            description_he,
            title,
            description,
            kind,
            lat,
            lng,
            reported_by,
        } => {
            let draft = IncidentDraft {
                title,
                title_he,
                description,
                description_he,
                kind,
                location: Coordinate::new(lat, lng),
                reported_by,
            };
            let incident = open(&config).await?.submit_draft(draft).await?;
            println!("{}", render::incident_line(&incident, locale));
        }
        Commands::Serve => serve(config).await?,
    }

    Ok(())
}

/// Builds the dashboard and performs the initial load.
///
/// A failed load is logged; whatever the snapshot restored is still shown.
async fn open(config: &DashboardConfig) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let dashboard = Dashboard::from_config(config)?;
    if let Err(e) = dashboard.load().await {
        log::warn!("Load failed, showing local data: {e}");
    }
    Ok(dashboard)
}

/// Writes the map layer as a GeoJSON `FeatureCollection`.
fn export_map(
    dashboard: &Dashboard,
    category: CategoryFilter,
    locale: Locale,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layer = dashboard.layer(category, locale);
    let json = serde_json::to_string_pretty(&layer.to_feature_collection())?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote {} features to {}", layer.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Runs the view server on its own actix system.
async fn serve(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so it runs in a blocking task
    // to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(|| {
        actix_web::rt::System::new().block_on(emergency_map_server::run_server(config))
    })
    .await??;
    Ok(())
}
