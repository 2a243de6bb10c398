//! Summary counts for the statistics panel.

use emergency_map_models::{Incident, OutageZone, Resource, Statistics};

/// Counts totals and active/open entities across the three collections.
#[must_use]
pub fn compute(
    resources: &[Resource],
    incidents: &[Incident],
    outages: &[OutageZone],
) -> Statistics {
    Statistics {
        total_resources: resources.len() as u64,
        active_resources: resources.iter().filter(|r| r.is_active()).count() as u64,
        open_incidents: incidents.iter().filter(|i| i.is_open()).count() as u64,
        active_outages: outages.iter().filter(|o| o.is_active()).count() as u64,
    }
}
