//! Incident intake form.

use chrono::{DateTime, Utc};
use emergency_map_models::{
    ANONYMOUS_REPORTER, Coordinate, Incident, IncidentStatus, IncidentType, Priority,
};
use serde::{Deserialize, Serialize};

/// Where the form's map pin starts.
pub const DEFAULT_LOCATION: Coordinate = Coordinate::new(32.0853, 34.7818);

/// Errors from validating a draft.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    /// A required text field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The coordinate is not a finite in-range position.
    #[error("Invalid location: {lat}, {lng}")]
    InvalidLocation {
        /// Latitude as entered.
        lat: f64,
        /// Longitude as entered.
        lng: f64,
    },
}

/// User-entered incident fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentDraft {
    /// English title.
    pub title: String,
    /// Hebrew title. Required.
    pub title_he: String,
    /// English description.
    pub description: String,
    /// Hebrew description. Required.
    pub description_he: String,
    /// Incident kind, wire field `type`.
    #[serde(rename = "type")]
    pub kind: IncidentType,
    /// Position.
    #[serde(flatten)]
    pub location: Coordinate,
    /// Reporter, `anonymous` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
}

impl Default for IncidentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_he: String::new(),
            description: String::new(),
            description_he: String::new(),
            kind: IncidentType::default(),
            location: DEFAULT_LOCATION,
            reported_by: None,
        }
    }
}

impl IncidentDraft {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError`] for the first problem found.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.title_he.trim().is_empty() {
            return Err(IntakeError::MissingField("title_he"));
        }
        if self.description_he.trim().is_empty() {
            return Err(IntakeError::MissingField("description_he"));
        }
        if !self.location.is_valid() {
            return Err(IntakeError::InvalidLocation {
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        Ok(())
    }

    /// Validates the draft and turns it into a new open incident with a
    /// fresh ID, reported at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError`] if validation fails.
    pub fn prepare(&self, now: DateTime<Utc>) -> Result<Incident, IntakeError> {
        self.validate()?;

        let reported_by = self
            .reported_by
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(ANONYMOUS_REPORTER)
            .to_string();

        Ok(Incident {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            title_he: self.title_he.trim().to_string(),
            description: self.description.trim().to_string(),
            description_he: self.description_he.trim().to_string(),
            kind: self.kind,
            location: self.location,
            status: IncidentStatus::Open,
            priority: Priority::Medium,
            reported_by,
            reported_at: now,
        })
    }
}

/// State of the report-incident modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntakeForm {
    /// Whether the modal is shown.
    pub open: bool,
    /// Current field values.
    pub draft: IncidentDraft,
    /// Message from the last failed submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntakeForm {
    /// Shows the form, keeping any draft in progress.
    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Hides the form. The draft is kept for next time.
    pub const fn cancel(&mut self) {
        self.open = false;
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, draft: IncidentDraft) {
        self.draft = draft;
    }

    /// Records a failed submission. The form stays open with the draft.
    pub fn fail(&mut self, message: String) {
        self.open = true;
        self.error = Some(message);
    }

    /// Clears the draft and closes the form after a successful submission.
    pub fn complete(&mut self) {
        *self = Self::default();
    }
}
