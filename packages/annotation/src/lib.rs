#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map annotation builder.
//!
//! Converts resources, incidents, and outage zones into display-ready
//! annotations: point markers with an icon, filled polygons with a fixed
//! style, and a [`detail::DetailPayload`] for each popup. Everything here
//! is pure; missing optional fields simply produce fewer detail lines.

pub mod builder;
pub mod detail;
pub mod export;
pub mod format;
pub mod style;

use emergency_map_models::Coordinate;
use serde::Serialize;

pub use builder::{AnnotationBuilder, MarkerAnnotation, MarkerKind, PolygonAnnotation};
pub use detail::{DetailLine, DetailPayload, Tone};
pub use format::FormatOptions;

/// Everything drawn on the map, in draw order: outage polygons beneath
/// resource pins beneath incident pins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLayer {
    /// Outage zone overlays.
    pub outages: Vec<PolygonAnnotation>,
    /// Resource pins, already filtered.
    pub resources: Vec<MarkerAnnotation>,
    /// Incident pins.
    pub incidents: Vec<MarkerAnnotation>,
}

impl MapLayer {
    /// Total number of annotations in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outages.len() + self.resources.len() + self.incidents.len()
    }

    /// Returns `true` when nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Initial map camera and tile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Map center.
    pub center: Coordinate,
    /// Zoom level.
    pub zoom: u8,
    /// Tile URL template.
    pub tile_url: &'static str,
    /// Tile attribution HTML.
    pub attribution: &'static str,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(31.7683, 35.2137),
            zoom: 8,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        }
    }
}
