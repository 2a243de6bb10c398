#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entity types shared across the emergency map workspace.
//!
//! Resources, incidents, and outage zones are deserialized from the
//! remote API (and the local incident snapshot) using the same flat
//! snake-case JSON shape the API produces. Every bilingual field is stored
//! as an English/Hebrew pair and resolved through [`Locale`].

pub mod labels;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Display language for labels and bilingual entity fields.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Locale {
    /// Hebrew, right-to-left. The dashboard's primary language.
    #[default]
    He,
    /// English.
    En,
}

impl Locale {
    /// Picks the field for this locale, falling back to the other language
    /// when the preferred one is blank.
    #[must_use]
    pub fn pick<'a>(self, en: &'a str, he: &'a str) -> &'a str {
        let (preferred, fallback) = match self {
            Self::He => (he, en),
            Self::En => (en, he),
        };
        if preferred.trim().is_empty() {
            fallback
        } else {
            preferred
        }
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and within the
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// The fixed set of resource categories the map knows how to draw.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceCategory {
    /// Backup power units
    Generator,
    /// Hospitals and clinics
    Medical,
    /// Public shelters
    Shelter,
    /// Fire and rescue stations
    FireStation,
    /// Police stations
    Police,
    /// Food and equipment supply points
    Supply,
    /// Water distribution points
    Water,
    /// Evacuation routes and assembly points
    Evacuation,
}

impl ResourceCategory {
    /// Returns all variants in filter-control display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Generator,
            Self::Medical,
            Self::Shelter,
            Self::FireStation,
            Self::Police,
            Self::Supply,
            Self::Water,
            Self::Evacuation,
        ]
    }
}

/// A resource's category as it arrived on the wire.
///
/// Upstream data is not guaranteed to stay inside [`ResourceCategory`], so
/// unknown values are kept verbatim instead of failing the whole
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryTag {
    /// One of the known categories.
    Known(ResourceCategory),
    /// Anything else, preserved as received.
    Unrecognized(String),
}

impl CategoryTag {
    /// Returns the known category, if any.
    #[must_use]
    pub const fn known(&self) -> Option<ResourceCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns the wire name of this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(category) => category.as_ref(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<ResourceCategory> for CategoryTag {
    fn from(category: ResourceCategory) -> Self {
        Self::Known(category)
    }
}

impl From<String> for CategoryTag {
    fn from(raw: String) -> Self {
        raw.parse::<ResourceCategory>()
            .map_or(Self::Unrecognized(raw), Self::Known)
    }
}

impl From<CategoryTag> for String {
    fn from(tag: CategoryTag) -> Self {
        match tag {
            CategoryTag::Known(category) => category.to_string(),
            CategoryTag::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a resource.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceStatus {
    /// In service
    #[default]
    Active,
    /// Temporarily out of service for maintenance
    Maintenance,
    /// Out of service
    Inactive,
    /// Any value the API sent that is not one of the above. Shown as
    /// inactive.
    #[serde(other)]
    Unrecognized,
}

/// Priority level shared by resources and incidents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    /// Life-critical
    Critical,
    /// High
    High,
    /// Medium, the default for new incidents
    #[default]
    Medium,
    /// Low
    Low,
    /// Any value the API sent that is not one of the above
    #[serde(other)]
    Unspecified,
}

impl Priority {
    /// Sort rank, lowest first. Unspecified ranks with medium.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium | Self::Unspecified => 2,
            Self::Low => 3,
        }
    }
}

/// Kind of a user-reported incident.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentType {
    /// Fire
    Fire,
    /// Medical emergency
    Medical,
    /// Evacuation needed
    Evacuation,
    /// Power failure
    Power,
    /// Anything else
    #[default]
    Other,
    /// A type the API sent that the form does not offer
    #[serde(other)]
    Unrecognized,
}

impl IncidentType {
    /// Returns all variants in form display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fire,
            Self::Medical,
            Self::Evacuation,
            Self::Power,
            Self::Other,
        ]
    }
}

/// Lifecycle status of an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentStatus {
    /// Reported, not yet handled
    #[default]
    Open,
    /// Being handled
    InProgress,
    /// Closed
    Resolved,
    /// Any value the API sent that is not one of the above
    #[serde(other)]
    Unrecognized,
}

/// Status of a power outage zone.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutageStatus {
    /// Power is currently out
    #[default]
    Active,
    /// Power restored
    Resolved,
    /// Any value the API sent that is not one of the above
    #[serde(other)]
    Unrecognized,
}

/// A fixed emergency facility or asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource ID.
    pub id: String,
    /// English name.
    pub name: String,
    /// Hebrew name.
    pub name_he: String,
    /// English description.
    #[serde(default)]
    pub description: String,
    /// Hebrew description.
    #[serde(default)]
    pub description_he: String,
    /// Category, wire field `type`.
    #[serde(rename = "type")]
    pub category: CategoryTag,
    /// Position.
    #[serde(flatten)]
    pub location: Coordinate,
    /// Operational status.
    #[serde(default)]
    pub status: ResourceStatus,
    /// Capacity (beds, people, liters, kW depending on category).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// When the record was last updated upstream.
    #[serde(
        default,
        with = "wire::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Resource {
    /// Name in the given locale.
    #[must_use]
    pub fn name(&self, locale: Locale) -> &str {
        locale.pick(&self.name, &self.name_he)
    }

    /// Description in the given locale.
    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_he)
    }

    /// Returns `true` if the resource is in service.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ResourceStatus::Active
    }
}

/// A user-reported emergency event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique incident ID, assigned at creation.
    pub id: String,
    /// English title.
    #[serde(default)]
    pub title: String,
    /// Hebrew title.
    pub title_he: String,
    /// English description.
    #[serde(default)]
    pub description: String,
    /// Hebrew description.
    pub description_he: String,
    /// Incident kind, wire field `type`.
    #[serde(rename = "type", default)]
    pub kind: IncidentType,
    /// Position.
    #[serde(flatten)]
    pub location: Coordinate,
    /// Lifecycle status.
    #[serde(default)]
    pub status: IncidentStatus,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Reporter identity.
    #[serde(default = "default_reporter")]
    pub reported_by: String,
    /// When the incident was reported, assigned at creation.
    #[serde(with = "wire::timestamp")]
    pub reported_at: DateTime<Utc>,
}

/// Reporter identity used when no authenticated user is available.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

fn default_reporter() -> String {
    ANONYMOUS_REPORTER.to_string()
}

impl Incident {
    /// Title in the given locale.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        locale.pick(&self.title, &self.title_he)
    }

    /// Description in the given locale.
    #[must_use]
    pub fn description(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_he)
    }

    /// Returns `true` if the incident has not been picked up yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == IncidentStatus::Open
    }
}

/// A polygonal area affected by a power outage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageZone {
    /// Unique outage ID.
    pub id: String,
    /// English area name.
    pub area_name: String,
    /// Hebrew area name.
    pub area_name_he: String,
    /// Polygon boundary as `[lat, lng]` pairs, wire field `coordinates`.
    /// The ring is not required to repeat its first point.
    #[serde(rename = "coordinates", with = "wire::ring")]
    pub boundary: Vec<Coordinate>,
    /// Expected restoration time.
    #[serde(
        default,
        with = "wire::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_restoration: Option<DateTime<Utc>>,
    /// Number of people affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_population: Option<u64>,
    /// Outage status.
    #[serde(default)]
    pub status: OutageStatus,
    /// When the outage was reported.
    #[serde(with = "wire::timestamp")]
    pub reported_at: DateTime<Utc>,
}

/// Minimum number of distinct boundary points for a drawable polygon.
pub const MIN_BOUNDARY_POINTS: usize = 3;

impl OutageZone {
    /// Area name in the given locale.
    #[must_use]
    pub fn area_name(&self, locale: Locale) -> &str {
        locale.pick(&self.area_name, &self.area_name_he)
    }

    /// Returns `true` if power is currently out in this zone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == OutageStatus::Active
    }

    /// Returns `true` if the boundary has enough points to form a polygon.
    #[must_use]
    pub fn has_drawable_boundary(&self) -> bool {
        let mut distinct = self.boundary.len();
        if distinct > 1 && self.boundary.first() == self.boundary.last() {
            distinct -= 1;
        }
        distinct >= MIN_BOUNDARY_POINTS
    }
}

/// Summary counts shown in the statistics panel.
///
/// Always derived from the store's collections, never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of known resources.
    pub total_resources: u64,
    /// Resources with status `active`.
    pub active_resources: u64,
    /// Incidents with status `open`.
    pub open_incidents: u64,
    /// Outage zones with status `active`.
    pub active_outages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_is_preserved() {
        let tag = CategoryTag::from("helipad".to_string());
        assert_eq!(tag, CategoryTag::Unrecognized("helipad".to_string()));
        assert_eq!(tag.known(), None);
        assert_eq!(String::from(tag), "helipad");
    }

    #[test]
    fn known_category_parses_from_wire_name() {
        let tag = CategoryTag::from("fire_station".to_string());
        assert_eq!(tag.known(), Some(ResourceCategory::FireStation));
        assert_eq!(tag.as_str(), "fire_station");
    }

    #[test]
    fn unknown_priority_deserializes_as_unspecified() {
        let p: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(p, Priority::Unspecified);
        let p: Priority = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(p, Priority::Critical);
    }

    #[test]
    fn unknown_statuses_do_not_fail_the_collection() {
        let resources: Vec<Resource> = serde_json::from_value(serde_json::json!([
            { "id": "a", "name": "A", "name_he": "א", "type": "water",
              "lat": 32.0, "lng": 34.8, "status": "active" },
            { "id": "b", "name": "B", "name_he": "ב", "type": "water",
              "lat": 32.0, "lng": 34.8, "status": "offline" },
        ]))
        .unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[1].status, ResourceStatus::Unrecognized);
        assert!(!resources[1].is_active());

        let status: IncidentStatus = serde_json::from_str("\"escalated\"").unwrap();
        assert_eq!(status, IncidentStatus::Unrecognized);
        let status: OutageStatus = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(status, OutageStatus::Unrecognized);
    }

    #[test]
    fn unknown_incident_type_is_kept_as_unrecognized() {
        let incidents: Vec<Incident> = serde_json::from_value(serde_json::json!([
            { "id": "i-1", "title": "Flood", "title_he": "הצפה",
              "description_he": "הצפה ברחוב", "type": "flood",
              "lat": 32.0, "lng": 34.8, "status": "open",
              "reported_at": "2025-03-15T12:00:00" },
            { "id": "i-2", "title": "Fire", "title_he": "שריפה",
              "description_he": "שריפה בבניין", "type": "fire",
              "lat": 32.0, "lng": 34.8, "status": "open",
              "reported_at": "2025-03-15T12:00:00" },
        ]))
        .unwrap();
        assert_eq!(incidents[0].kind, IncidentType::Unrecognized);
        assert_eq!(incidents[1].kind, IncidentType::Fire);
        assert!(!IncidentType::all().contains(&IncidentType::Unrecognized));
    }

    #[test]
    fn resource_without_optional_fields_deserializes() {
        let json = serde_json::json!({
            "id": "r-1",
            "name": "Depot",
            "name_he": "מחסן",
            "type": "supply",
            "lat": 32.0,
            "lng": 34.8,
        });
        let resource: Resource = serde_json::from_value(json).unwrap();
        assert_eq!(resource.capacity, None);
        assert_eq!(resource.contact_phone, None);
        assert_eq!(resource.last_updated, None);
        assert_eq!(resource.status, ResourceStatus::Active);
        assert_eq!(resource.priority, Priority::Medium);
        assert_eq!(resource.category.known(), Some(ResourceCategory::Supply));
    }

    #[test]
    fn outage_boundary_reads_lat_lng_pairs() {
        let json = serde_json::json!({
            "id": "o-1",
            "area_name": "Downtown",
            "area_name_he": "מרכז",
            "coordinates": [[32.08, 34.78], [32.07, 34.78], [32.07, 34.79]],
            "status": "active",
            "reported_at": "2025-03-15T12:00:00",
        });
        let outage: OutageZone = serde_json::from_value(json).unwrap();
        assert_eq!(outage.boundary.len(), 3);
        assert!((outage.boundary[1].lat - 32.07).abs() < f64::EPSILON);
        assert!((outage.boundary[1].lng - 34.78).abs() < f64::EPSILON);
        assert!(outage.has_drawable_boundary());
        assert_eq!(outage.affected_population, None);
    }

    #[test]
    fn closed_triangle_with_repeated_point_is_not_drawable() {
        let outage = OutageZone {
            id: "o".to_string(),
            area_name: String::new(),
            area_name_he: String::new(),
            boundary: vec![
                Coordinate::new(1.0, 1.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(1.0, 1.0),
            ],
            estimated_restoration: None,
            affected_population: None,
            status: OutageStatus::Active,
            reported_at: Utc::now(),
        };
        assert!(!outage.has_drawable_boundary());
    }

    #[test]
    fn locale_pick_falls_back_when_blank() {
        assert_eq!(Locale::He.pick("Fire", "שריפה"), "שריפה");
        assert_eq!(Locale::En.pick("Fire", "שריפה"), "Fire");
        assert_eq!(Locale::En.pick("  ", "שריפה"), "שריפה");
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn coordinate_validation() {
        assert!(Coordinate::new(32.08, 34.78).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn priority_rank_orders_critical_first() {
        assert!(Priority::Critical.rank() < Priority::High.rank());
        assert_eq!(Priority::Unspecified.rank(), Priority::Medium.rank());
    }
}
