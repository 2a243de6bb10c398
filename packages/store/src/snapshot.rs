//! Local snapshot of the incident collection.
//!
//! The snapshot is the offline fallback for incidents: it is read once at
//! startup and rewritten after every successful mutation. A snapshot that
//! cannot be read back is discarded rather than surfaced to the user.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use emergency_map_models::Incident;
use thiserror::Error;

/// Default location of the incident snapshot file.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/emergency_incidents.json";

/// Errors from reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON or could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file holds valid JSON that is not an array.
    #[error("snapshot is not a JSON array")]
    NotAnArray,
}

impl SnapshotError {
    /// Returns `true` if the file was read but its content is unusable.
    /// I/O failures are not malformed content.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Json(_) | Self::NotAnArray)
    }
}

/// Narrow persistence interface for the incident collection.
pub trait IncidentSnapshot: Send + Sync {
    /// Loads the persisted incidents, or an empty collection if nothing
    /// usable is stored.
    fn load(&self) -> Vec<Incident>;

    /// Persists `incidents`. Failures are logged, never returned.
    fn save(&self, incidents: &[Incident]);
}

/// Snapshot stored as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    /// Creates a snapshot backed by `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot.
    ///
    /// Returns `Ok(None)` when the file does not exist or is blank.
    /// Array elements that do not parse as incidents are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file cannot be read, is not JSON,
    /// or is not a JSON array.
    pub fn try_load(&self) -> Result<Option<Vec<Incident>>, SnapshotError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let serde_json::Value::Array(items) = value else {
            return Err(SnapshotError::NotAnArray);
        };

        let total = items.len();
        let incidents: Vec<Incident> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Incident>(item) {
                Ok(incident) => Some(incident),
                Err(e) => {
                    log::warn!("Skipping malformed incident in snapshot: {e}");
                    None
                }
            })
            .collect();
        if incidents.len() < total {
            log::warn!(
                "Loaded {} of {total} incidents from {}",
                incidents.len(),
                self.path.display()
            );
        }

        Ok(Some(incidents))
    }

    /// Writes the snapshot through a temporary file and a rename, creating
    /// the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if serialization or any file operation
    /// fails.
    pub fn try_save(&self, incidents: &[Incident]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(incidents)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl IncidentSnapshot for JsonFileSnapshot {
    fn load(&self) -> Vec<Incident> {
        match self.try_load() {
            Ok(Some(incidents)) => {
                log::info!(
                    "Loaded {} incidents from snapshot {}",
                    incidents.len(),
                    self.path.display()
                );
                incidents
            }
            Ok(None) => Vec::new(),
            Err(e) if !e.is_malformed() => {
                log::error!(
                    "Failed to read incident snapshot {}, starting empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
            Err(e) => {
                log::error!(
                    "Discarding unreadable incident snapshot {}: {e}",
                    self.path.display()
                );
                if let Err(e) = std::fs::remove_file(&self.path) {
                    log::warn!("Failed to remove {}: {e}", self.path.display());
                }
                Vec::new()
            }
        }
    }

    fn save(&self, incidents: &[Incident]) {
        if let Err(e) = self.try_save(incidents) {
            log::error!(
                "Failed to save incident snapshot {}: {e}",
                self.path.display()
            );
        }
    }
}

/// Snapshot kept in memory only. Used for offline demo mode and tests.
#[derive(Debug, Default)]
pub struct InMemorySnapshot {
    incidents: Mutex<Vec<Incident>>,
}

impl InMemorySnapshot {
    /// Creates a snapshot pre-populated with `incidents`.
    #[must_use]
    pub const fn with_incidents(incidents: Vec<Incident>) -> Self {
        Self {
            incidents: Mutex::new(incidents),
        }
    }
}

impl IncidentSnapshot for InMemorySnapshot {
    fn load(&self) -> Vec<Incident> {
        self.incidents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, incidents: &[Incident]) {
        *self.incidents.lock().unwrap_or_else(PoisonError::into_inner) = incidents.to_vec();
    }
}
