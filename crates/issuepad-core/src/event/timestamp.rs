//! `whenUtc` timestamp encoding.
//!
//! Written as RFC 3339 in UTC with a `Z` suffix. Read leniently: any RFC
//! 3339 offset is converted to UTC, and an offset-less local form
//! (`2024-01-01T12:00:00.1234567`) is taken as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Error returned for a `whenUtc` value that is not a recognizable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid whenUtc timestamp '{raw}'")]
pub struct InvalidTimestamp {
    pub raw: String,
}

/// Format a timestamp the way the journal stores it.
#[must_use]
pub fn format(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a stored `whenUtc` value.
///
/// # Errors
///
/// Returns [`InvalidTimestamp`] when neither the RFC 3339 nor the
/// offset-less form matches.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
    let trimmed = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| InvalidTimestamp {
            raw: raw.to_string(),
        })
}

/// Serde adapter for `Option<DateTime<Utc>>` fields.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&super::format(t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|r| super::parse(&r).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_whole_seconds_has_z_suffix() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format(&t), "2024-01-01T12:00:00Z");
    }

    #[test]
    fn format_keeps_millis() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(format(&t), "2024-01-01T12:00:00.250Z");
    }

    #[test]
    fn parse_rfc3339_utc() {
        let t = parse("2024-01-01T12:00:00Z").expect("parse");
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn parse_rfc3339_offset_converts_to_utc() {
        let t = parse("2024-01-01T14:00:00+02:00").expect("parse");
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn parse_offsetless_seven_digit_fraction() {
        let t = parse("2024-01-01T12:00:00.1234567").expect("parse");
        assert_eq!(t.timestamp(), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap().timestamp());
        assert_eq!(t.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parse_offsetless_without_fraction() {
        assert!(parse("2024-01-01T12:00:00").is_ok());
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse("yesterday").unwrap_err();
        assert_eq!(err.raw, "yesterday");
        assert!(parse("").is_err());
    }
}
