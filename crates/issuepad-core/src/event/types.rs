//! Event type enum covering the five journal event types.
//!
//! The string form is the bare lowercase verb stored in the `type` key of
//! every journal line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five event types a journal line may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Create (or re-create) an issue.
    Add,
    /// Overwrite the text fields present in the event.
    Update,
    /// Mark the issue done.
    Resolve,
    /// Mark the issue open again.
    Reopen,
    /// Remove the issue from current state.
    Delete,
}

/// Error returned when parsing an unknown event type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown event type '{}': expected one of add, update, resolve, reopen, delete",
            self.raw
        )
    }
}

impl std::error::Error for UnknownEventType {}

impl EventType {
    /// All known event types in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Update,
        Self::Resolve,
        Self::Reopen,
        Self::Delete,
    ];

    /// Return the wire string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Resolve => "resolve",
            Self::Reopen => "reopen",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "resolve" => Ok(Self::Resolve),
            "reopen" => Ok(Self::Reopen),
            "delete" => Ok(Self::Delete),
            _ => Err(UnknownEventType { raw: s.to_string() }),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_types() {
        let expected = [
            (EventType::Add, "add"),
            (EventType::Update, "update"),
            (EventType::Resolve, "resolve"),
            (EventType::Reopen, "reopen"),
            (EventType::Delete, "delete"),
        ];

        for (et, s) in expected {
            assert_eq!(et.to_string(), s);
            assert_eq!(et.as_str(), s);
        }
    }

    #[test]
    fn fromstr_all_types() {
        for et in EventType::ALL {
            let parsed: EventType = et.as_str().parse().expect("should parse");
            assert_eq!(parsed, et);
        }
    }

    #[test]
    fn fromstr_rejects_unknown() {
        let err = "archive".parse::<EventType>().unwrap_err();
        assert_eq!(err.raw, "archive");
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn fromstr_is_case_sensitive() {
        assert!("Add".parse::<EventType>().is_err());
        assert!("RESOLVE".parse::<EventType>().is_err());
    }

    #[test]
    fn fromstr_rejects_empty() {
        assert!("".parse::<EventType>().is_err());
    }

    #[test]
    fn serde_uses_wire_string() {
        let json = serde_json::to_string(&EventType::Reopen).expect("serialize");
        assert_eq!(json, "\"reopen\"");
        let back: EventType = serde_json::from_str("\"delete\"").expect("deserialize");
        assert_eq!(back, EventType::Delete);
        assert!(serde_json::from_str::<EventType>("\"close\"").is_err());
    }
}
