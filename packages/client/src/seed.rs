//! Bundled seed data for offline demo mode.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use emergency_map_models::{Incident, OutageZone, Resource, ResourceCategory, Statistics};
use serde::Deserialize;

use crate::{ClientError, DataSource, HealthStatus};

const SEED_RESOURCES: &str = include_str!("../seed/resources.json");
const SEED_OUTAGES: &str = include_str!("../seed/outages.json");

#[derive(Deserialize)]
struct SeedResources {
    resources: Vec<Resource>,
}

#[derive(Deserialize)]
struct SeedOutages {
    outages: Vec<OutageZone>,
}

/// In-process data source over fixed resources and outages. Submitted
/// incidents are kept in memory.
#[derive(Debug, Default)]
pub struct StaticSource {
    resources: Vec<Resource>,
    outages: Vec<OutageZone>,
    incidents: RwLock<Vec<Incident>>,
}

impl StaticSource {
    /// Loads the bundled seed data.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] if the bundled seed files do not parse.
    pub fn seeded() -> Result<Self, ClientError> {
        let SeedResources { resources } = serde_json::from_str(SEED_RESOURCES)?;
        let SeedOutages { outages } = serde_json::from_str(SEED_OUTAGES)?;
        log::debug!(
            "Loaded seed data: {} resources, {} outages",
            resources.len(),
            outages.len()
        );
        Ok(Self::new(resources, Vec::new(), outages))
    }

    /// Creates a source over the given collections.
    #[must_use]
    pub const fn new(
        resources: Vec<Resource>,
        incidents: Vec<Incident>,
        outages: Vec<OutageZone>,
    ) -> Self {
        Self {
            resources,
            outages,
            incidents: RwLock::new(incidents),
        }
    }

    fn incidents(&self) -> Vec<Incident> {
        self.incidents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn name(&self) -> &str {
        "seed data"
    }

    async fn fetch_resources(
        &self,
        category: Option<ResourceCategory>,
    ) -> Result<Vec<Resource>, ClientError> {
        Ok(self
            .resources
            .iter()
            .filter(|r| category.is_none_or(|c| r.category.known() == Some(c)))
            .cloned()
            .collect())
    }

    async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>, ClientError> {
        Ok(self.resources.iter().find(|r| r.id == id).cloned())
    }

    async fn fetch_incidents(&self) -> Result<Vec<Incident>, ClientError> {
        Ok(self.incidents())
    }

    async fn fetch_outages(&self) -> Result<Vec<OutageZone>, ClientError> {
        Ok(self.outages.clone())
    }

    async fn fetch_statistics(&self) -> Result<Statistics, ClientError> {
        let incidents = self.incidents();
        Ok(Statistics {
            total_resources: self.resources.len() as u64,
            active_resources: self.resources.iter().filter(|r| r.is_active()).count() as u64,
            open_incidents: incidents.iter().filter(|i| i.is_open()).count() as u64,
            active_outages: self.outages.iter().filter(|o| o.is_active()).count() as u64,
        })
    }

    async fn submit_incident(&self, incident: &Incident) -> Result<Incident, ClientError> {
        let mut incidents = self
            .incidents
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        incidents.retain(|i| i.id != incident.id);
        incidents.push(incident.clone());
        Ok(incident.clone())
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Ok(HealthStatus::healthy())
    }
}
