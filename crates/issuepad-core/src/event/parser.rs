//! Journal line parser.
//!
//! Decodes one journal line into a typed [`Event`]. Lines are classified
//! rather than trusted:
//!
//! - Blank/whitespace-only lines are returned as [`ParsedLine::Blank`].
//! - Lines that are not a JSON object of the expected shape, or that lack a
//!   recognized `type` or a non-blank `id`, return a [`DecodeError`]. The
//!   reconstructor skips those lines; it never fails a load because of one.
//!
//! Surrounding whitespace, a trailing `\r`, and a leading UTF-8 byte-order
//! mark are ignored. Unknown JSON keys are ignored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::event::types::EventType;
use crate::event::{Event, EventRecord, timestamp};

/// Errors that can occur while decoding a journal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The line is not a JSON object matching the record schema.
    InvalidJson(String),
    /// The `type` key is absent, null, or blank.
    MissingType,
    /// The `type` key is not one of the five known verbs.
    UnknownType(String),
    /// The `id` key is absent, null, or blank.
    MissingId,
    /// The raw line bytes are not UTF-8. Produced by the journal reader.
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(details) => write!(f, "invalid record JSON: {details}"),
            Self::MissingType => write!(f, "record has no type"),
            Self::UnknownType(raw) => write!(f, "unknown event type: '{raw}'"),
            Self::MissingId => write!(f, "record has no id"),
            Self::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result of decoding a single journal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Event(Event),
    Blank,
}

/// Loosely-typed mirror of [`EventRecord`] used for the first decode pass,
/// so that a missing or unknown `type` can be told apart from broken JSON.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(rename = "type")]
    event_type: Option<String>,
    id: Option<String>,
    application: Option<String>,
    title: Option<String>,
    description: Option<String>,
    notes: Option<String>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    when_utc: Option<DateTime<Utc>>,
}

/// Decode one journal line.
///
/// # Errors
///
/// Returns [`DecodeError`] describing why the line cannot contribute an
/// event.
pub fn parse_line(line: &str) -> Result<ParsedLine, DecodeError> {
    let trimmed = line.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let raw: RawRecord =
        serde_json::from_str(trimmed).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    let event_type = match raw.event_type.as_deref() {
        None => return Err(DecodeError::MissingType),
        Some(t) if t.trim().is_empty() => return Err(DecodeError::MissingType),
        Some(t) => t
            .parse::<EventType>()
            .map_err(|e| DecodeError::UnknownType(e.raw))?,
    };

    let id = match raw.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(DecodeError::MissingId),
    };

    let record = EventRecord {
        event_type,
        id,
        application: raw.application,
        title: raw.title,
        description: raw.description,
        notes: raw.notes,
        when_utc: raw.when_utc,
    };

    Ok(ParsedLine::Event(Event::from(record)))
}
