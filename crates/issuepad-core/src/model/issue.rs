use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::IssueFields;

/// Title given to an issue whose `add` event carried none.
pub const UNTITLED: &str = "(untitled)";

/// Current state of one issue, reconstructed by replaying the journal.
///
/// Never persisted itself; only events are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub done: bool,
    pub application: String,
    pub title: String,
    pub description: String,
    pub notes: String,
    /// Set by the `add` that introduced the id. Later events never touch it.
    pub created_utc: DateTime<Utc>,
}

impl Issue {
    /// Build a fresh, open issue from the fields of an `add` event.
    #[must_use]
    pub fn created(id: impl Into<String>, fields: &IssueFields, created_utc: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            done: false,
            application: fields.application.clone().unwrap_or_default(),
            title: fields.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            description: fields.description.clone().unwrap_or_default(),
            notes: fields.notes.clone().unwrap_or_default(),
            created_utc,
        }
    }

    /// Copy of `self` with every supplied field overwritten.
    #[must_use]
    pub fn patched(&self, fields: &IssueFields) -> Self {
        Self {
            application: fields
                .application
                .clone()
                .unwrap_or_else(|| self.application.clone()),
            title: fields.title.clone().unwrap_or_else(|| self.title.clone()),
            description: fields
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            notes: fields.notes.clone().unwrap_or_else(|| self.notes.clone()),
            ..self.clone()
        }
    }

    /// Copy of `self` with `done` set.
    #[must_use]
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.done
    }

    /// `"done"` or `"open"`, for display.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        if self.done { "done" } else { "open" }
    }
}
