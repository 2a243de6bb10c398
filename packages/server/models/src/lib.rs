#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the emergency map view server.
//!
//! Entity payloads (resources, incidents, statistics) are returned in
//! their wire shape; the types here cover query parameters and the
//! server's own envelopes.

use emergency_map_models::Statistics;
use serde::{Deserialize, Serialize};

/// Server health.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the view server is up.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Name of the data source behind the dashboard.
    pub source: String,
    /// Whether a load or refresh is in flight.
    pub loading: bool,
    /// Current store revision.
    pub revision: u64,
}

/// Query parameters for views that can be filtered and localized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQueryParams {
    /// Category filter wire name (`all`, `medical`, ...). Defaults to the
    /// dashboard's selected filter.
    pub category: Option<String>,
    /// `he` or `en`. Defaults to the configured locale.
    pub locale: Option<String>,
}

/// Query parameters for the resources endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQueryParams {
    /// Category filter wire name. Defaults to `all`.
    pub category: Option<String>,
}

/// One entry of the category list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Filter value (`all`, `generator`, ...).
    pub value: String,
    /// Hebrew label.
    pub label: String,
    /// English label.
    pub label_en: String,
    /// Resources currently matching this filter.
    pub count: usize,
    /// Whether this is the dashboard's selected filter.
    pub selected: bool,
}

/// Result of a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRefresh {
    /// Store revision after the refresh.
    pub revision: u64,
    /// Statistics after the refresh.
    pub statistics: Statistics,
    /// Whether incidents came from the local copy.
    pub incidents_from_snapshot: bool,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
