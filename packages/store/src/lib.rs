#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical in-memory state for one dashboard session.
//!
//! [`ResourceStore`] owns the resource, incident, and outage collections
//! and the [`Statistics`] derived from them. There are exactly two
//! mutation entry points, [`ResourceStore::replace`] and
//! [`ResourceStore::append_incident`]; both recompute statistics in the
//! same call and bump the store revision, which is broadcast to
//! subscribers over a `tokio::sync::watch` channel.

pub mod filter;
pub mod snapshot;
pub mod statistics;

use emergency_map_models::{Incident, OutageZone, Resource, Statistics};
use tokio::sync::watch;

pub use filter::CategoryFilter;

/// A full set of entity collections, as produced by a load or refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    /// Emergency resources.
    pub resources: Vec<Resource>,
    /// User-reported incidents.
    pub incidents: Vec<Incident>,
    /// Power outage zones.
    pub outages: Vec<OutageZone>,
}

/// The session's resource store.
#[derive(Debug)]
pub struct ResourceStore {
    collections: Collections,
    statistics: Statistics,
    revision: u64,
    changes: watch::Sender<u64>,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore {
    /// Creates an empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            collections: Collections::default(),
            statistics: Statistics::default(),
            revision: 0,
            changes,
        }
    }

    /// Creates a store seeded with previously persisted incidents and no
    /// resources or outages.
    #[must_use]
    pub fn with_incidents(incidents: Vec<Incident>) -> Self {
        let mut store = Self::new();
        if !incidents.is_empty() {
            store.replace(Collections {
                incidents,
                ..Collections::default()
            });
        }
        store
    }

    /// All known resources in upstream order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.collections.resources
    }

    /// All known incidents in upstream order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.collections.incidents
    }

    /// All known outage zones in upstream order.
    #[must_use]
    pub fn outages(&self) -> &[OutageZone] {
        &self.collections.outages
    }

    /// Statistics for the current collections.
    #[must_use]
    pub const fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Monotonic revision, bumped on every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Finds a resource by ID.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.collections.resources.iter().find(|r| r.id == id)
    }

    /// Resources visible under `filter`, in upstream order.
    #[must_use]
    pub fn visible_resources(&self, filter: CategoryFilter) -> Vec<&Resource> {
        filter::filter_resources(&self.collections.resources, filter)
    }

    /// Subscribes to revision changes.
    ///
    /// The receiver starts at the current revision; every mutation
    /// publishes the new one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Replaces all three collections and recomputes statistics.
    ///
    /// Returns the new revision.
    pub fn replace(&mut self, collections: Collections) -> u64 {
        let statistics = statistics::compute(
            &collections.resources,
            &collections.incidents,
            &collections.outages,
        );
        self.collections = collections;
        self.statistics = statistics;
        log::debug!(
            "Store replaced: {} resources, {} incidents, {} outages",
            self.collections.resources.len(),
            self.collections.incidents.len(),
            self.collections.outages.len(),
        );
        self.bump()
    }

    /// Appends an incident, or replaces the one with the same ID in place.
    ///
    /// Returns the new revision.
    pub fn append_incident(&mut self, incident: Incident) -> u64 {
        let incidents = &mut self.collections.incidents;
        if let Some(existing) = incidents.iter_mut().find(|i| i.id == incident.id) {
            log::debug!("Incident {} already in store, replacing", incident.id);
            *existing = incident;
        } else {
            incidents.push(incident);
        }
        self.statistics = statistics::compute(
            &self.collections.resources,
            &self.collections.incidents,
            &self.collections.outages,
        );
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.changes.send_replace(self.revision);
        self.revision
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone as _, Utc};
    use emergency_map_models::{
        CategoryTag, Coordinate, Incident, IncidentStatus, IncidentType, OutageStatus, OutageZone,
        Priority, Resource, ResourceCategory, ResourceStatus,
    };

    pub fn resource(id: &str, category: ResourceCategory, status: ResourceStatus) -> Resource {
        Resource {
            id: id.to_string(),
            name: format!("Resource {id}"),
            name_he: format!("משאב {id}"),
            description: String::new(),
            description_he: String::new(),
            category: CategoryTag::Known(category),
            location: Coordinate::new(32.08, 34.78),
            status,
            capacity: Some(100),
            priority: Priority::High,
            contact_phone: Some("03-1234567".to_string()),
            last_updated: Some(Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap()),
        }
    }

    pub fn incident(id: &str, status: IncidentStatus) -> Incident {
        Incident {
            id: id.to_string(),
            title: String::new(),
            title_he: "שריפה".to_string(),
            description: String::new(),
            description_he: "שריפה בבניין".to_string(),
            kind: IncidentType::Fire,
            location: Coordinate::new(32.08, 34.78),
            status,
            priority: Priority::Medium,
            reported_by: "anonymous".to_string(),
            reported_at: Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    pub fn outage(id: &str, status: OutageStatus) -> OutageZone {
        OutageZone {
            id: id.to_string(),
            area_name: "Downtown".to_string(),
            area_name_he: "מרכז".to_string(),
            boundary: vec![
                Coordinate::new(32.0853, 34.7818),
                Coordinate::new(32.0753, 34.7818),
                Coordinate::new(32.0753, 34.7918),
                Coordinate::new(32.0853, 34.7918),
            ],
            estimated_restoration: None,
            affected_population: Some(15_000),
            status,
            reported_at: Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap(),
        }
    }
}
