//! Bilingual display labels for the closed enumerations.

use crate::{
    IncidentStatus, IncidentType, Locale, OutageStatus, Priority, ResourceCategory, ResourceStatus,
};

/// Label for the "all categories" filter option.
#[must_use]
pub const fn all_categories(locale: Locale) -> &'static str {
    match locale {
        Locale::He => "הכל",
        Locale::En => "All",
    }
}

impl ResourceCategory {
    /// Plural category label as shown on the filter buttons.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Generator, Locale::He) => "גנרטורים",
            (Self::Generator, Locale::En) => "Generators",
            (Self::Medical, Locale::He) => "רפואה",
            (Self::Medical, Locale::En) => "Medical",
            (Self::Shelter, Locale::He) => "מקלטים",
            (Self::Shelter, Locale::En) => "Shelters",
            (Self::FireStation, Locale::He) => "כיבוי אש",
            (Self::FireStation, Locale::En) => "Fire Stations",
            (Self::Police, Locale::He) => "משטרה",
            (Self::Police, Locale::En) => "Police",
            (Self::Supply, Locale::He) => "אספקה",
            (Self::Supply, Locale::En) => "Supply",
            (Self::Water, Locale::He) => "מים",
            (Self::Water, Locale::En) => "Water",
            (Self::Evacuation, Locale::He) => "פינוי",
            (Self::Evacuation, Locale::En) => "Evacuation",
        }
    }
}

impl ResourceStatus {
    /// Status label.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Active, Locale::He) => "פעיל",
            (Self::Active, Locale::En) => "Active",
            (Self::Maintenance, Locale::He) => "תחזוקה",
            (Self::Maintenance, Locale::En) => "Maintenance",
            (Self::Inactive | Self::Unrecognized, Locale::He) => "לא פעיל",
            (Self::Inactive | Self::Unrecognized, Locale::En) => "Inactive",
        }
    }
}

impl IncidentStatus {
    /// Status label.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Open, Locale::He) => "פתוח",
            (Self::Open, Locale::En) => "Open",
            (Self::InProgress, Locale::He) => "בטיפול",
            (Self::InProgress, Locale::En) => "In Progress",
            (Self::Resolved, Locale::He) => "נפתר",
            (Self::Resolved, Locale::En) => "Resolved",
            (Self::Unrecognized, Locale::He) => "לא ידוע",
            (Self::Unrecognized, Locale::En) => "Unknown",
        }
    }
}

impl OutageStatus {
    /// Status label.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Active, Locale::He) => "פעיל",
            (Self::Active, Locale::En) => "Active",
            (Self::Resolved, Locale::He) => "נפתר",
            (Self::Resolved, Locale::En) => "Resolved",
            (Self::Unrecognized, Locale::He) => "לא ידוע",
            (Self::Unrecognized, Locale::En) => "Unknown",
        }
    }
}

impl IncidentType {
    /// Type label as shown in the report form's selector.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Fire, Locale::He) => "שריפה",
            (Self::Fire, Locale::En) => "Fire",
            (Self::Medical, Locale::He) => "רפואי",
            (Self::Medical, Locale::En) => "Medical",
            (Self::Evacuation, Locale::He) => "פינוי",
            (Self::Evacuation, Locale::En) => "Evacuation",
            (Self::Power, Locale::He) => "חשמל",
            (Self::Power, Locale::En) => "Power",
            (Self::Other | Self::Unrecognized, Locale::He) => "אחר",
            (Self::Other | Self::Unrecognized, Locale::En) => "Other",
        }
    }
}

impl Priority {
    /// Priority label.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Critical, Locale::He) => "קריטי",
            (Self::Critical, Locale::En) => "Critical",
            (Self::High, Locale::He) => "גבוה",
            (Self::High, Locale::En) => "High",
            (Self::Medium | Self::Unspecified, Locale::He) => "בינוני",
            (Self::Medium | Self::Unspecified, Locale::En) => "Medium",
            (Self::Low, Locale::He) => "נמוך",
            (Self::Low, Locale::En) => "Low",
        }
    }
}
