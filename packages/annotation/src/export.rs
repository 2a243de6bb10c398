//! GeoJSON export of a [`MapLayer`].
//!
//! Positions are written `[lng, lat]` as GeoJSON requires, and polygon
//! rings are closed by repeating the first point when upstream data left
//! them open.

use emergency_map_models::Coordinate;
use geo::BoundingRect as _;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};

use crate::builder::{MarkerAnnotation, PolygonAnnotation};
use crate::MapLayer;

/// Axis-aligned bounds of a set of annotations.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Bounds {
    /// South-west corner.
    pub south_west: Coordinate,
    /// North-east corner.
    pub north_east: Coordinate,
}

impl Bounds {
    /// The bounds as a GeoJSON `bbox`: `[west, south, east, north]`.
    #[must_use]
    pub fn to_bbox(&self) -> Vec<f64> {
        vec![
            self.south_west.lng,
            self.south_west.lat,
            self.north_east.lng,
            self.north_east.lat,
        ]
    }
}

impl MapLayer {
    /// Bounding box of every marker position and polygon vertex, or `None`
    /// for an empty layer.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let points: Vec<geo::Point<f64>> = self
            .outages
            .iter()
            .flat_map(|polygon| polygon.ring.iter())
            .chain(self.resources.iter().map(|marker| &marker.position))
            .chain(self.incidents.iter().map(|marker| &marker.position))
            .map(|c| geo::Point::new(c.lng, c.lat))
            .collect();

        let rect = geo::MultiPoint::from(points).bounding_rect()?;
        Some(Bounds {
            south_west: Coordinate::new(rect.min().y, rect.min().x),
            north_east: Coordinate::new(rect.max().y, rect.max().x),
        })
    }

    /// Exports the layer as a GeoJSON feature collection. Outages come
    /// first so they render beneath the pins.
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .outages
            .iter()
            .map(polygon_feature)
            .chain(self.resources.iter().map(|m| marker_feature(m, "resources")))
            .chain(self.incidents.iter().map(|m| marker_feature(m, "incidents")))
            .collect();

        FeatureCollection {
            bbox: self.bounds().map(|b| b.to_bbox()),
            features,
            foreign_members: None,
        }
    }
}

fn position(c: &Coordinate) -> Vec<f64> {
    vec![c.lng, c.lat]
}

fn closed_ring(ring: &[Coordinate]) -> Vec<Vec<f64>> {
    let mut out: Vec<Vec<f64>> = ring.iter().map(position).collect();
    let closing = match (out.first(), out.last()) {
        (Some(first), Some(last)) if first != last => Some(first.clone()),
        _ => None,
    };
    out.extend(closing);
    out
}

fn properties(layer: &str, detail: &crate::detail::DetailPayload) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("layer".to_string(), layer.into());
    props.insert("title".to_string(), detail.heading.clone().into());
    props.insert(
        "detail".to_string(),
        serde_json::to_value(detail).unwrap_or(serde_json::Value::Null),
    );
    props
}

fn marker_feature(marker: &MarkerAnnotation, layer: &str) -> Feature {
    let mut props = properties(layer, &marker.detail);
    props.insert(
        "icon".to_string(),
        serde_json::to_value(marker.icon).unwrap_or(serde_json::Value::Null),
    );
    props.insert("iconClass".to_string(), marker.icon.css_class().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(&marker.position)))),
        id: Some(Id::String(marker.key.clone())),
        properties: Some(props),
        foreign_members: None,
    }
}

fn polygon_feature(polygon: &PolygonAnnotation) -> Feature {
    let mut props = properties("outages", &polygon.detail);
    props.insert(
        "style".to_string(),
        serde_json::to_value(polygon.style).unwrap_or(serde_json::Value::Null),
    );
    if let Some(anchor) = &polygon.anchor {
        props.insert("anchor".to_string(), position(anchor).into());
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![closed_ring(&polygon.ring)]))),
        id: Some(Id::String(polygon.key.clone())),
        properties: Some(props),
        foreign_members: None,
    }
}
