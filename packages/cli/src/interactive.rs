//! Interactive menu for the CLI.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use emergency_map_dashboard::intake::DEFAULT_LOCATION;
use emergency_map_dashboard::{DashboardConfig, IncidentDraft};
use emergency_map_models::{Coordinate, IncidentType, Locale};
use emergency_map_store::CategoryFilter;
use emergency_map_store::filter::filter_options;

use crate::render;

/// Top-level actions.
enum Action {
    Statistics,
    ListResources,
    ExportMap,
    ReportIncident,
    Serve,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Statistics,
        Self::ListResources,
        Self::ExportMap,
        Self::ReportIncident,
        Self::Serve,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Statistics => "Show statistics",
            Self::ListResources => "List resources",
            Self::ExportMap => "Export map layer (GeoJSON)",
            Self::ReportIncident => "Report an incident",
            Self::Serve => "Start view server",
        }
    }
}

/// Prompts for an action and runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected action fails.
pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Emergency Map");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let locale = config.locale;
    match Action::ALL[idx] {
        Action::Statistics => {
            let dashboard = crate::open(&config).await?;
            print!("{}", render::statistics(dashboard.statistics(), locale));
        }
        Action::ListResources => {
            let category = select_category()?;
            let grouped = Confirm::new()
                .with_prompt("Group by category?")
                .default(category == CategoryFilter::All)
                .interact()?;
            let resources = crate::open(&config).await?.resources(category);
            print!("{}", render::resource_list(&resources, locale, grouped));
        }
        Action::ExportMap => {
            let category = select_category()?;
            let output: String = Input::new()
                .with_prompt("Output file")
                .default("emergency_map.geojson".to_string())
                .interact_text()?;
            let dashboard = crate::open(&config).await?;
            crate::export_map(
                &dashboard,
                category,
                locale,
                Some(PathBuf::from(output).as_path()),
            )?;
        }
        Action::ReportIncident => {
            let draft = prompt_draft()?;
            let incident = crate::open(&config).await?.submit_draft(draft).await?;
            println!("{}", render::incident_line(&incident, locale));
        }
        Action::Serve => crate::serve(config).await?,
    }

    Ok(())
}

fn select_category() -> Result<CategoryFilter, dialoguer::Error> {
    let options = filter_options();
    let labels: Vec<String> = options
        .iter()
        .map(|option| format!("{} ({})", option.label_en, option.label))
        .collect();
    let idx = Select::new()
        .with_prompt("Category")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[idx].value)
}

fn prompt_draft() -> Result<IncidentDraft, dialoguer::Error> {
    let title_he: String = Input::new().with_prompt("Title (Hebrew)").interact_text()?;
    let description_he: String = Input::new()
        .with_prompt("Description (Hebrew)")
        .interact_text()?;

    let kinds = IncidentType::all();
    let labels: Vec<String> = kinds
        .iter()
        .map(|kind| format!("{} ({})", kind.label(Locale::En), kind.label(Locale::He)))
        .collect();
    let kind_idx = Select::new()
        .with_prompt("Type")
        .items(&labels)
        .default(kinds.len() - 1)
        .interact()?;

    let lat: f64 = Input::new()
        .with_prompt("Latitude")
        .default(DEFAULT_LOCATION.lat)
        .interact_text()?;
    let lng: f64 = Input::new()
        .with_prompt("Longitude")
        .default(DEFAULT_LOCATION.lng)
        .interact_text()?;

    Ok(IncidentDraft {
        title_he,
        description_he,
        kind: kinds[kind_idx],
        location: Coordinate::new(lat, lng),
        ..IncidentDraft::default()
    })
}
