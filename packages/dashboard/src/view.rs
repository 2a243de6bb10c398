//! Composed dashboard view-model: header, statistics panel, filter
//! control, map, and intake modal.

use emergency_map_annotation::{MapLayer, MapView};
use emergency_map_models::{IncidentType, Locale, Statistics};
use emergency_map_store::CategoryFilter;
use emergency_map_store::filter::{FilterOption, filter_options};
use serde::Serialize;

use crate::intake::IntakeForm;

/// Top bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Dashboard title.
    pub title: &'static str,
    /// Report-incident button label.
    pub report_label: &'static str,
    /// Refresh button label.
    pub refresh_label: &'static str,
    /// Whether a load or refresh is in flight. Disables refresh.
    pub loading: bool,
    /// Overlay text shown while loading.
    pub loading_label: &'static str,
}

impl Header {
    fn new(locale: Locale, loading: bool) -> Self {
        Self {
            title: locale.pick("Israel Emergency Platform", "פלטפורמת חירום ישראל"),
            report_label: locale.pick("Report Incident", "דווח על אירוע"),
            refresh_label: locale.pick("Refresh", "רענן"),
            loading,
            loading_label: locale.pick("Updating data...", "מעדכן נתונים..."),
        }
    }
}

/// One card of the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatCard {
    /// Stable key (`total_resources`, ...).
    pub key: &'static str,
    /// Card label.
    pub label: &'static str,
    /// Count.
    pub value: u64,
}

/// The four statistics cards, in display order.
#[must_use]
pub fn stat_cards(statistics: Statistics, locale: Locale) -> [StatCard; 4] {
    [
        StatCard {
            key: "total_resources",
            label: locale.pick("Total Resources", "סה״כ משאבים"),
            value: statistics.total_resources,
        },
        StatCard {
            key: "active_resources",
            label: locale.pick("Active Resources", "משאבים פעילים"),
            value: statistics.active_resources,
        },
        StatCard {
            key: "open_incidents",
            label: locale.pick("Open Incidents", "אירועים פתוחים"),
            value: statistics.open_incidents,
        },
        StatCard {
            key: "active_outages",
            label: locale.pick("Power Outages", "הפסקות חשמל"),
            value: statistics.active_outages,
        },
    ]
}

/// The category filter buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    /// Panel heading.
    pub title: &'static str,
    /// Currently selected filter.
    pub selected: CategoryFilter,
    /// Buttons in display order.
    pub options: Vec<FilterOption>,
}

impl FilterControl {
    fn new(selected: CategoryFilter, locale: Locale) -> Self {
        Self {
            title: locale.pick("Filter Resources", "סינון משאבים"),
            selected,
            options: filter_options(),
        }
    }
}

/// The map panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPanel {
    /// Panel heading.
    pub title: &'static str,
    /// `Showing N of M resources` caption.
    pub caption: String,
    /// Resources shown after filtering.
    pub shown: usize,
    /// All known resources.
    pub total: usize,
    /// Initial camera.
    pub view: MapView,
    /// Annotations to draw.
    pub layer: MapLayer,
}

impl MapPanel {
    /// Builds the panel for a layer whose resources are already filtered.
    #[must_use]
    pub fn new(layer: MapLayer, total: usize, locale: Locale) -> Self {
        let shown = layer.resources.len();
        let caption = match locale {
            Locale::He => format!("מציג {shown} משאבים מתוך {total}"),
            Locale::En => format!("Showing {shown} of {total} resources"),
        };
        Self {
            title: locale.pick("Emergency Map", "מפת חירום"),
            caption,
            shown,
            total,
            view: MapView::default(),
            layer,
        }
    }
}

/// One entry of the incident type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeOption {
    /// Type the entry selects.
    pub value: IncidentType,
    /// Entry label.
    pub label: &'static str,
}

/// Report-incident modal: form state plus its labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakePanel {
    /// Modal title.
    pub title: &'static str,
    /// Hebrew title field label.
    pub title_he_label: &'static str,
    /// Hebrew description field label.
    pub description_he_label: &'static str,
    /// Type selector label.
    pub kind_label: &'static str,
    /// Type selector entries, in form order.
    pub kind_options: Vec<TypeOption>,
    /// Latitude field label.
    pub lat_label: &'static str,
    /// Longitude field label.
    pub lng_label: &'static str,
    /// Submit button label.
    pub submit_label: &'static str,
    /// Cancel button label.
    pub cancel_label: &'static str,
    /// Open flag, draft, and last error.
    #[serde(flatten)]
    pub form: IntakeForm,
}

impl IntakePanel {
    /// Labels the form for `locale`.
    #[must_use]
    pub fn new(form: IntakeForm, locale: Locale) -> Self {
        Self {
            title: locale.pick("Report New Incident", "דיווח אירוע חדש"),
            title_he_label: locale.pick("Hebrew Title", "כותרת בעברית"),
            description_he_label: locale.pick("Hebrew Description", "תיאור בעברית"),
            kind_label: locale.pick("Incident Type", "סוג אירוע"),
            kind_options: IncidentType::all()
                .iter()
                .map(|&value| TypeOption {
                    value,
                    label: value.label(locale),
                })
                .collect(),
            lat_label: locale.pick("Latitude", "קו רוחב"),
            lng_label: locale.pick("Longitude", "קו אורך"),
            submit_label: locale.pick("Submit Report", "שלח דיווח"),
            cancel_label: locale.pick("Cancel", "ביטול"),
            form,
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Language the view was rendered in.
    pub locale: Locale,
    /// Store revision the view was built from.
    pub revision: u64,
    /// Top bar.
    pub header: Header,
    /// Raw statistics.
    pub statistics: Statistics,
    /// Statistics panel cards.
    pub cards: [StatCard; 4],
    /// Filter control.
    pub filter: FilterControl,
    /// Map panel.
    pub map: MapPanel,
    /// Report-incident modal.
    pub intake: IntakePanel,
}

/// Inputs for [`compose`].
#[derive(Debug)]
pub struct ViewParts {
    /// Display language.
    pub locale: Locale,
    /// Store revision.
    pub revision: u64,
    /// Whether the loading gate is held.
    pub loading: bool,
    /// Current statistics.
    pub statistics: Statistics,
    /// Selected filter.
    pub selected: CategoryFilter,
    /// Map layer with filtered resources.
    pub layer: MapLayer,
    /// Number of resources before filtering.
    pub total_resources: usize,
    /// Intake form state.
    pub intake: IntakeForm,
}

/// Assembles the view from its parts.
#[must_use]
pub fn compose(parts: ViewParts) -> DashboardView {
    let ViewParts {
        locale,
        revision,
        loading,
        statistics,
        selected,
        layer,
        total_resources,
        intake,
    } = parts;

    DashboardView {
        locale,
        revision,
        header: Header::new(locale, loading),
        statistics,
        cards: stat_cards(statistics, locale),
        filter: FilterControl::new(selected, locale),
        map: MapPanel::new(layer, total_resources, locale),
        intake: IntakePanel::new(intake, locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_cards_follow_panel_order() {
        let stats = Statistics {
            total_resources: 25,
            active_resources: 24,
            open_incidents: 1,
            active_outages: 2,
        };
        let cards = stat_cards(stats, Locale::He);
        let values: Vec<_> = cards.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![25, 24, 1, 2]);
        assert_eq!(cards[0].label, "סה״כ משאבים");
        assert_eq!(stat_cards(stats, Locale::En)[3].label, "Power Outages");
    }

    #[test]
    fn caption_counts_shown_and_total() {
        let panel = MapPanel::new(MapLayer::default(), 25, Locale::He);
        assert_eq!(panel.caption, "מציג 0 משאבים מתוך 25");
        let panel = MapPanel::new(MapLayer::default(), 3, Locale::En);
        assert_eq!(panel.caption, "Showing 0 of 3 resources");
    }

    #[test]
    fn intake_panel_is_labelled_and_keeps_form_state() {
        let mut form = IntakeForm::default();
        form.open();
        form.fail("Missing required field: title_he".to_string());

        let panel = IntakePanel::new(form.clone(), Locale::He);
        assert_eq!(panel.title, "דיווח אירוע חדש");
        assert_eq!(panel.title_he_label, "כותרת בעברית");
        assert_eq!(panel.description_he_label, "תיאור בעברית");
        assert_eq!(panel.kind_label, "סוג אירוע");
        assert_eq!((panel.lat_label, panel.lng_label), ("קו רוחב", "קו אורך"));
        assert_eq!((panel.submit_label, panel.cancel_label), ("שלח דיווח", "ביטול"));
        assert_eq!(panel.kind_options.len(), 5);
        assert_eq!(panel.kind_options[0].label, "שריפה");
        assert_eq!(panel.form, form);

        let panel = IntakePanel::new(IntakeForm::default(), Locale::En);
        assert_eq!(panel.submit_label, "Submit Report");
        assert_eq!(panel.kind_options[4].value, IncidentType::Other);
    }

    #[test]
    fn filter_control_lists_all_first() {
        let control = FilterControl::new(CategoryFilter::All, Locale::He);
        assert_eq!(control.options[0].value, CategoryFilter::All);
        assert_eq!(control.options[0].label, "הכל");
        assert_eq!(control.options.len(), 9);
    }
}
