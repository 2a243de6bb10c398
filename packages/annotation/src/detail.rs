//! Popup detail payloads.

use emergency_map_models::Locale;
use serde::Serialize;

/// Semantic color of a value, mapped to green/orange/red by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Green
    Positive,
    /// Orange
    Warning,
    /// Red
    Critical,
}

/// One `label: value` row of a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    /// Localized field label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
    /// Value color, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Link target for the value (e.g. `tel:` URIs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Everything a popup shows for one annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    /// Popup title.
    pub heading: String,
    /// Title color, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_tone: Option<Tone>,
    /// Color of the dot shown before the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_color: Option<&'static str>,
    /// Paragraph under the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Field rows in display order.
    pub lines: Vec<DetailLine>,
    /// Text direction of the popup.
    pub direction: &'static str,
}

impl DetailPayload {
    pub(crate) fn new(heading: impl Into<String>, locale: Locale) -> Self {
        Self {
            heading: heading.into(),
            heading_tone: None,
            indicator_color: None,
            summary: None,
            lines: Vec::new(),
            direction: match locale {
                Locale::He => "rtl",
                Locale::En => "ltr",
            },
        }
    }

    pub(crate) fn with_summary(mut self, summary: &str) -> Self {
        let summary = summary.trim();
        if !summary.is_empty() {
            self.summary = Some(summary.to_string());
        }
        self
    }

    pub(crate) const fn with_heading_tone(mut self, tone: Tone) -> Self {
        self.heading_tone = Some(tone);
        self
    }

    pub(crate) const fn with_indicator(mut self, color: &'static str) -> Self {
        self.indicator_color = Some(color);
        self
    }

    pub(crate) fn line(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.lines.push(DetailLine {
            label,
            value: value.into(),
            tone: None,
            href: None,
        });
        self
    }

    pub(crate) fn toned_line(
        mut self,
        label: &'static str,
        value: impl Into<String>,
        tone: Tone,
    ) -> Self {
        self.lines.push(DetailLine {
            label,
            value: value.into(),
            tone: Some(tone),
            href: None,
        });
        self
    }

    /// Adds a row only when `value` is present.
    pub(crate) fn optional_line(self, label: &'static str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.line(label, value),
            None => self,
        }
    }

    pub(crate) fn linked_line(mut self, label: &'static str, value: String, href: String) -> Self {
        self.lines.push(DetailLine {
            label,
            value,
            tone: None,
            href: Some(href),
        });
        self
    }

    /// Finds a row by label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&DetailLine> {
        self.lines.iter().find(|line| line.label == label)
    }

    /// Renders the payload as plain text, one row per line.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = self.heading.clone();
        if let Some(summary) = &self.summary {
            out.push('\n');
            out.push_str(summary);
        }
        for line in &self.lines {
            out.push('\n');
            out.push_str(line.label);
            out.push_str(": ");
            out.push_str(&line.value);
        }
        out
    }
}

/// Field labels used in popups.
pub mod field {
    use emergency_map_models::Locale;

    macro_rules! labels {
        ($($(#[$meta:meta])* $name:ident => $he:literal, $en:literal;)*) => {
            $(
                $(#[$meta])*
                #[must_use]
                pub const fn $name(locale: Locale) -> &'static str {
                    match locale {
                        Locale::He => $he,
                        Locale::En => $en,
                    }
                }
            )*
        };
    }

    labels! {
        /// Category / incident type.
        kind => "סוג", "Type";
        /// Status.
        status => "סטטוס", "Status";
        /// Resource capacity.
        capacity => "קיבולת", "Capacity";
        /// Contact phone.
        phone => "טלפון", "Phone";
        /// Resource last-updated time.
        last_updated => "עדכון אחרון", "Last Updated";
        /// Outage area name.
        area => "אזור", "Area";
        /// Outage affected population.
        affected_population => "אוכלוסייה מושפעת", "Affected Population";
        /// Outage estimated restoration time.
        estimated_restoration => "זמן משוער לשיקום", "Estimated Restoration";
        /// Incident reporter.
        reported_by => "דווח על ידי", "Reported By";
        /// Incident report time.
        reported_at => "תאריך דיווח", "Reported At";
        /// Outage popup heading.
        outage_heading => "הפסקת חשמל", "Power Outage";
    }
}
