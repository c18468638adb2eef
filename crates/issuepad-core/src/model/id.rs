//! Issue id generation.
//!
//! Ids are the UTC creation instant formatted as `yyyyMMddHHmmssfff`
//! (17 digits, millisecond precision). Two issues created in the same
//! millisecond would share an id, and the second `add` would overwrite the
//! first on replay. [`next_issue_id`] avoids that by stepping forward one
//! millisecond at a time past any id already present in the journal.
//!
//! Two processes appending to the same journal can still collide; the
//! journal assumes a single writer.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

/// Format `t` as a 17-digit millisecond timestamp id.
#[must_use]
pub fn timestamp_id(t: DateTime<Utc>) -> String {
    t.format("%Y%m%d%H%M%S%3f").to_string()
}

/// First timestamp id at or after `now` that is not in `taken`.
#[must_use]
pub fn next_issue_id(now: DateTime<Utc>, taken: &HashSet<String>) -> String {
    let mut t = now;
    loop {
        let candidate = timestamp_id(t);
        if !taken.contains(&candidate) {
            return candidate;
        }
        t += Duration::milliseconds(1);
    }
}
