//! Entity → annotation conversion.

use emergency_map_models::{Coordinate, Incident, OutageZone, Resource, ResourceStatus};
use emergency_map_models::{IncidentStatus, OutageStatus};
use geo::Centroid as _;
use serde::Serialize;

use crate::detail::{DetailPayload, Tone, field};
use crate::format::{FormatOptions, group_digits};
use crate::style::{self, ALERT_ICON, MarkerIcon, OUTAGE_STYLE, PolygonStyle};
use crate::MapLayer;

/// What a point annotation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// An emergency resource.
    Resource,
    /// A reported incident.
    Incident,
}

/// A map pin with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerAnnotation {
    /// Entity ID, unique within its kind.
    pub key: String,
    /// Entity kind.
    pub kind: MarkerKind,
    /// Pin position.
    pub position: Coordinate,
    /// Pin icon.
    pub icon: MarkerIcon,
    /// Popup contents.
    pub detail: DetailPayload,
}

/// A filled polygon overlay with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonAnnotation {
    /// Outage ID.
    pub key: String,
    /// Boundary in upstream order, not closed.
    pub ring: Vec<Coordinate>,
    /// Polygon centroid, used to anchor the popup.
    pub anchor: Option<Coordinate>,
    /// Stroke and fill.
    pub style: PolygonStyle,
    /// Popup contents.
    pub detail: DetailPayload,
}

/// Builds annotations for one locale and time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationBuilder {
    options: FormatOptions,
}

impl AnnotationBuilder {
    /// Creates a builder with the given formatting options.
    #[must_use]
    pub const fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// The builder's formatting options.
    #[must_use]
    pub const fn options(&self) -> FormatOptions {
        self.options
    }

    /// Resource pin: category icon, priority dot, and facility details.
    #[must_use]
    pub fn resource(&self, resource: &Resource) -> MarkerAnnotation {
        let locale = self.options.locale;
        let kind_label = resource
            .category
            .known()
            .map_or_else(|| resource.category.as_str(), |c| c.label(locale));
        let status_tone = match resource.status {
            ResourceStatus::Active => Tone::Positive,
            ResourceStatus::Maintenance => Tone::Warning,
            ResourceStatus::Inactive | ResourceStatus::Unrecognized => Tone::Critical,
        };
        let phone = resource
            .contact_phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let mut detail = DetailPayload::new(resource.name(locale), locale)
            .with_indicator(style::priority_color(resource.priority))
            .with_summary(resource.description(locale))
            .line(field::kind(locale), kind_label)
            .toned_line(field::status(locale), resource.status.label(locale), status_tone)
            .optional_line(field::capacity(locale), resource.capacity.map(group_digits));
        if let Some(phone) = phone {
            detail =
                detail.linked_line(field::phone(locale), phone.to_string(), format!("tel:{phone}"));
        }
        let detail = detail.optional_line(
            field::last_updated(locale),
            resource.last_updated.map(|dt| self.options.timestamp(&dt)),
        );

        MarkerAnnotation {
            key: resource.id.clone(),
            kind: MarkerKind::Resource,
            position: resource.location,
            icon: style::resource_icon(&resource.category),
            detail,
        }
    }

    /// Outage overlay, or `None` when the boundary has fewer than three
    /// distinct points.
    #[must_use]
    pub fn outage(&self, outage: &OutageZone) -> Option<PolygonAnnotation> {
        if !outage.has_drawable_boundary() {
            log::warn!(
                "Skipping outage {}: boundary has {} points",
                outage.id,
                outage.boundary.len()
            );
            return None;
        }
        let locale = self.options.locale;
        let status_tone = match outage.status {
            OutageStatus::Active => Tone::Critical,
            OutageStatus::Resolved => Tone::Positive,
            OutageStatus::Unrecognized => Tone::Warning,
        };

        let detail = DetailPayload::new(field::outage_heading(locale), locale)
            .with_heading_tone(Tone::Critical)
            .line(field::area(locale), outage.area_name(locale))
            .optional_line(
                field::affected_population(locale),
                outage.affected_population.map(group_digits),
            )
            .optional_line(
                field::estimated_restoration(locale),
                outage
                    .estimated_restoration
                    .map(|dt| self.options.timestamp(&dt)),
            )
            .toned_line(field::status(locale), outage.status.label(locale), status_tone);

        Some(PolygonAnnotation {
            key: outage.id.clone(),
            ring: outage.boundary.clone(),
            anchor: centroid(&outage.boundary),
            style: OUTAGE_STYLE,
            detail,
        })
    }

    /// Incident pin: always the alert icon.
    #[must_use]
    pub fn incident(&self, incident: &Incident) -> MarkerAnnotation {
        let locale = self.options.locale;
        let status_tone = match incident.status {
            IncidentStatus::Open => Tone::Critical,
            IncidentStatus::InProgress | IncidentStatus::Unrecognized => Tone::Warning,
            IncidentStatus::Resolved => Tone::Positive,
        };

        let detail = DetailPayload::new(incident.title(locale), locale)
            .with_heading_tone(Tone::Critical)
            .with_summary(incident.description(locale))
            .line(field::kind(locale), incident.kind.label(locale))
            .toned_line(field::status(locale), incident.status.label(locale), status_tone)
            .line(field::reported_by(locale), incident.reported_by.as_str())
            .line(
                field::reported_at(locale),
                self.options.timestamp(&incident.reported_at),
            );

        MarkerAnnotation {
            key: incident.id.clone(),
            kind: MarkerKind::Incident,
            position: incident.location,
            icon: ALERT_ICON,
            detail,
        }
    }

    /// Builds the full map layer.
    ///
    /// `resources` should already be filtered; incidents and outages are
    /// always shown in full.
    #[must_use]
    pub fn layer<'a>(
        &self,
        resources: impl IntoIterator<Item = &'a Resource>,
        incidents: &[Incident],
        outages: &[OutageZone],
    ) -> MapLayer {
        MapLayer {
            outages: outages.iter().filter_map(|o| self.outage(o)).collect(),
            resources: resources.into_iter().map(|r| self.resource(r)).collect(),
            incidents: incidents.iter().map(|i| self.incident(i)).collect(),
        }
    }
}

fn centroid(ring: &[Coordinate]) -> Option<Coordinate> {
    let exterior: geo::LineString<f64> = ring.iter().map(|c| (c.lng, c.lat)).collect();
    geo::Polygon::new(exterior, Vec::new())
        .centroid()
        .map(|p| Coordinate::new(p.y(), p.x()))
}
