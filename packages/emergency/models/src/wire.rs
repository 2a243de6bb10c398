//! Serde adapters for the API's loosely-typed wire formats.

/// Timestamps as sent by the API.
///
/// Accepts RFC 3339 with an offset (`2025-03-15T10:00:00Z`) and naive
/// ISO-8601 without one (`2025-03-15T10:00:00`, optionally with fractional
/// seconds), which is taken as UTC. Always serializes as RFC 3339 UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parses a wire timestamp.
    ///
    /// # Errors
    ///
    /// Returns the last [`chrono::ParseError`] if no accepted format
    /// matches.
    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let s = s.trim();
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(rfc_err) => {
                let mut last_err = rfc_err;
                for format in NAIVE_FORMATS {
                    match NaiveDateTime::parse_from_str(s, format) {
                        Ok(naive) => return Ok(naive.and_utc()),
                        Err(e) => last_err = e,
                    }
                }
                Err(last_err)
            }
        }
    }

    /// Formats a timestamp for the wire.
    #[must_use]
    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    /// # Errors
    ///
    /// Fails when the value is not a string or not a recognized timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module for `Option<DateTime<Utc>>`. `null` and
    /// empty strings read as `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        /// # Errors
        ///
        /// Propagates serializer errors.
        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&super::format(dt)),
                None => serializer.serialize_none(),
            }
        }

        /// # Errors
        ///
        /// Fails when a present value is not a recognized timestamp.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => super::parse(s).map(Some).map_err(serde::de::Error::custom),
            }
        }
    }
}

/// Polygon rings as arrays of `[lat, lng]` pairs.
pub mod ring {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::Coordinate;

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ring: &[Coordinate], serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<[f64; 2]> = ring.iter().map(|c| [c.lat, c.lng]).collect();
        pairs.serialize(serializer)
    }

    /// # Errors
    ///
    /// Fails when the value is not a list of two-element number arrays.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Coordinate>, D::Error> {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|[lat, lng]| Coordinate::new(lat, lng))
            .collect())
    }
}
