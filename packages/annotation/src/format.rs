//! Locale-aware number and timestamp formatting for detail payloads.

use chrono::{DateTime, FixedOffset, Offset as _, Utc};
use emergency_map_models::Locale;

/// Locale and time zone used when rendering detail payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Label and bilingual-field language.
    pub locale: Locale,
    /// Offset timestamps are shown in.
    pub utc_offset: FixedOffset,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(Locale::default(), 0)
    }
}

impl FormatOptions {
    /// Creates options for `locale`, showing times at `utc_offset_minutes`
    /// from UTC. Out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn new(locale: Locale, utc_offset_minutes: i32) -> Self {
        let utc_offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                log::warn!("Ignoring out-of-range UTC offset {utc_offset_minutes} minutes");
                utc()
            });
        Self { locale, utc_offset }
    }

    /// Formats a timestamp the way the browser's `toLocaleString` does for
    /// `he-IL` (`15.3.2025, 18:00:00`) or `en-US`
    /// (`3/15/2025, 6:00:00 PM`).
    #[must_use]
    pub fn timestamp(&self, dt: &DateTime<Utc>) -> String {
        let local = dt.with_timezone(&self.utc_offset);
        let pattern = match self.locale {
            Locale::He => "%-d.%-m.%Y, %H:%M:%S",
            Locale::En => "%-m/%-d/%Y, %-I:%M:%S %p",
        };
        local.format(pattern).to_string()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Formats an integer with comma thousands separators (`15000` → `15,000`).
#[must_use]
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
