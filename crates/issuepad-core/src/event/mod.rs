//! Event data model for the issuepad journal.
//!
//! Two shapes describe the same fact:
//!
//! - [`EventRecord`] is the wire struct, one JSON object per journal line
//!   with lower-camel-case keys. Optional fields are omitted when absent.
//! - [`Event`] is the typed form the fold consumes. It only exists for
//!   records with a recognized `type` and a non-blank `id`.
//!
//! # Wire format
//!
//! ```text
//! {"type":"add","id":"20240101120000000","application":"Billing","title":"Invoice bug","whenUtc":"2024-01-01T12:00:00Z"}
//! {"type":"resolve","id":"20240101120000000","whenUtc":"2024-01-01T13:00:00Z"}
//! ```
//!
//! Parsing lines is handled by [`parser`], writing by [`writer`].

pub mod parser;
pub mod timestamp;
pub mod types;
pub mod writer;

pub use parser::{DecodeError, ParsedLine, parse_line};
pub use types::{EventType, UnknownEventType};
pub use writer::{WriteError, to_json_line, write_line};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The four free-text fields an `add` or `update` event may carry.
///
/// `None` means "not supplied". For `add` that falls back to an empty
/// string (or the untitled placeholder); for `update` it keeps the prior
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    pub application: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl IssueFields {
    /// Fields with only a title set.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// True when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.application.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.notes.is_none()
    }
}

/// One journal line as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::option::serialize"
    )]
    pub when_utc: Option<DateTime<Utc>>,
}

impl EventRecord {
    fn bare(event_type: EventType, id: impl Into<String>, when_utc: DateTime<Utc>) -> Self {
        Self {
            event_type,
            id: id.into(),
            application: None,
            title: None,
            description: None,
            notes: None,
            when_utc: Some(when_utc),
        }
    }

    fn with_fields(mut self, fields: IssueFields) -> Self {
        self.application = fields.application;
        self.title = fields.title;
        self.description = fields.description;
        self.notes = fields.notes;
        self
    }

    /// An `add` record introducing `id`.
    #[must_use]
    pub fn add(id: impl Into<String>, fields: IssueFields, when_utc: DateTime<Utc>) -> Self {
        Self::bare(EventType::Add, id, when_utc).with_fields(fields)
    }

    /// An `update` record carrying only the supplied fields.
    #[must_use]
    pub fn update(id: impl Into<String>, fields: IssueFields, when_utc: DateTime<Utc>) -> Self {
        Self::bare(EventType::Update, id, when_utc).with_fields(fields)
    }

    #[must_use]
    pub fn resolve(id: impl Into<String>, when_utc: DateTime<Utc>) -> Self {
        Self::bare(EventType::Resolve, id, when_utc)
    }

    #[must_use]
    pub fn reopen(id: impl Into<String>, when_utc: DateTime<Utc>) -> Self {
        Self::bare(EventType::Reopen, id, when_utc)
    }

    #[must_use]
    pub fn delete(id: impl Into<String>, when_utc: DateTime<Utc>) -> Self {
        Self::bare(EventType::Delete, id, when_utc)
    }

    /// The record's text fields as an [`IssueFields`].
    #[must_use]
    pub fn fields(&self) -> IssueFields {
        IssueFields {
            application: self.application.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// The effect an event has on its target issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Add(IssueFields),
    Update(IssueFields),
    Resolve,
    Reopen,
    Delete,
}

impl Change {
    /// The wire type for this change.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Add(_) => EventType::Add,
            Self::Update(_) => EventType::Update,
            Self::Resolve => EventType::Resolve,
            Self::Reopen => EventType::Reopen,
            Self::Delete => EventType::Delete,
        }
    }
}

/// A decoded journal event, ready to be folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Target issue id. Never blank.
    pub id: String,
    /// Event time, if the line carried one.
    pub when_utc: Option<DateTime<Utc>>,
    pub change: Change,
}

impl Event {
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.change.event_type()
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        let change = match record.event_type {
            EventType::Add => Change::Add(record.fields()),
            EventType::Update => Change::Update(record.fields()),
            EventType::Resolve => Change::Resolve,
            EventType::Reopen => Change::Reopen,
            EventType::Delete => Change::Delete,
        };
        Self {
            id: record.id,
            when_utc: record.when_utc,
            change,
        }
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let fields = match &event.change {
            Change::Add(fields) | Change::Update(fields) => fields.clone(),
            Change::Resolve | Change::Reopen | Change::Delete => IssueFields::default(),
        };
        Self {
            event_type: event.event_type(),
            id: event.id.clone(),
            application: None,
            title: None,
            description: None,
            notes: None,
            when_utc: event.when_utc,
        }
        .with_fields(fields)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let when = self
            .when_utc
            .map_or_else(|| "-".to_string(), |t| timestamp::format(&t));
        write!(f, "{}\t{}\t{}", when, self.event_type(), self.id)?;
        match &self.change {
            Change::Add(fields) | Change::Update(fields) => {
                if let Some(title) = &fields.title {
                    write!(f, "\t{title}")?;
                }
                Ok(())
            }
            Change::Resolve | Change::Reopen | Change::Delete => Ok(()),
        }
    }
}
