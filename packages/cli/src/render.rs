//! Plain-text rendering of dashboard data for the terminal.

use std::fmt::Write as _;

use emergency_map_annotation::format::group_digits;
use emergency_map_dashboard::view::stat_cards;
use emergency_map_models::{Incident, Locale, Resource, Statistics};
use emergency_map_store::filter::group_by_category;

/// Renders the four statistics cards, one per line.
#[must_use]
pub fn statistics(statistics: Statistics, locale: Locale) -> String {
    let cards = stat_cards(statistics, locale);
    let width = cards
        .iter()
        .map(|card| card.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for card in &cards {
        let pad = width - card.label.chars().count();
        let _ = writeln!(
            out,
            "{}{}  {}",
            card.label,
            " ".repeat(pad),
            group_digits(card.value)
        );
    }
    out
}

/// One resource as a single line: id, name, type, status, capacity.
#[must_use]
pub fn resource_line(resource: &Resource, locale: Locale) -> String {
    let kind = resource
        .category
        .known()
        .map_or_else(|| resource.category.as_str(), |c| c.label(locale));
    let capacity = resource
        .capacity
        .map_or_else(|| "-".to_string(), group_digits);

    format!(
        "{:<12} {:<32} {:<16} {:<10} {}",
        resource.id,
        resource.name(locale),
        kind,
        resource.status.label(locale),
        capacity
    )
}

/// Renders resources either in upstream order or grouped by category.
#[must_use]
pub fn resource_list(resources: &[Resource], locale: Locale, grouped: bool) -> String {
    let mut out = String::new();

    if grouped {
        let refs: Vec<&Resource> = resources.iter().collect();
        for group in group_by_category(&refs) {
            let title = group
                .category
                .map_or_else(|| locale.pick("Other", "אחר"), |c| c.label(locale));
            let _ = writeln!(out, "{title} ({})", group.resources.len());
            for resource in group.resources {
                let _ = writeln!(out, "  {}", resource_line(resource, locale));
            }
        }
    } else {
        for resource in resources {
            let _ = writeln!(out, "{}", resource_line(resource, locale));
        }
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        resources.len(),
        locale.pick("resource(s)", "משאבים")
    );
    out
}

/// One-line confirmation for a stored incident.
#[must_use]
pub fn incident_line(incident: &Incident, locale: Locale) -> String {
    format!(
        "{} [{}] {} ({}, {})",
        incident.id,
        incident.kind.label(locale),
        incident.title(locale),
        incident.status.label(locale),
        incident.priority.label(locale),
    )
}

#[cfg(test)]
mod tests {
    use emergency_map_models::{Coordinate, ResourceStatus};

    use super::*;

    fn resource(id: &str, kind: &str) -> Resource {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Resource {id}"),
            "name_he": format!("משאב {id}"),
            "type": kind,
            "lat": 32.0,
            "lng": 34.8,
            "status": "active",
            "capacity": 12000,
        }))
        .unwrap()
    }

    #[test]
    fn statistics_lists_every_card() {
        let stats = Statistics {
            total_resources: 1234,
            active_resources: 1200,
            open_incidents: 3,
            active_outages: 2,
        };
        let text = statistics(stats, Locale::En);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Total Resources"));
        assert!(text.contains("1,234"));
        assert!(text.lines().last().unwrap().ends_with('2'));
    }

    #[test]
    fn resource_line_uses_labels_and_grouped_capacity() {
        let line = resource_line(&resource("m-1", "medical"), Locale::En);
        assert!(line.starts_with("m-1"));
        assert!(line.contains("Resource m-1"));
        assert!(line.contains("12,000"));
        assert!(line.contains("Active"));
    }

    #[test]
    fn unknown_category_shows_raw_value() {
        let line = resource_line(&resource("x-1", "helipad"), Locale::He);
        assert!(line.contains("helipad"));
        assert!(line.contains("משאב x-1"));
    }

    #[test]
    fn grouped_list_has_group_headers() {
        let mut generator = resource("g-1", "generator");
        generator.status = ResourceStatus::Maintenance;
        generator.location = Coordinate::new(31.0, 35.0);
        let resources = vec![resource("m-1", "medical"), generator, resource("x-1", "helipad")];

        let text = resource_list(&resources, Locale::En, true);
        let headers: Vec<&str> = text
            .lines()
            .filter(|line| !line.starts_with(' ') && line.contains('('))
            .collect();
        assert_eq!(headers.len(), 3);
        assert!(headers[0].starts_with("Generator"));
        assert!(headers[2].starts_with("Other"));
        assert!(text.trim_end().ends_with("3 resource(s)"));
    }

    #[test]
    fn flat_list_keeps_order() {
        let resources = vec![resource("b", "water"), resource("a", "police")];
        let text = resource_list(&resources, Locale::En, false);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with('b'));
    }
}
