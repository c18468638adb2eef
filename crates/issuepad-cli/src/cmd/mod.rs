//! Command handlers.
//!
//! Each module owns its clap `Args` struct and a `run_*` entry point that
//! takes the resolved [`OutputMode`] and the [`Journal`]. Mutating commands
//! append exactly one event, then reload the journal and render the result.

pub mod add;
pub mod completions;
pub mod delete;
pub mod list;
pub mod log;
pub mod path;
pub mod reopen;
pub mod resolve;
pub mod show;
pub mod toggle;
pub mod update;

use crate::output::{CliError, OutputMode, fail};
use issuepad_core::error::ErrorCode;
use issuepad_core::fold::IssueMap;
use issuepad_core::journal::{Journal, JournalError, ReplayOptions};
use issuepad_core::{EventRecord, Issue};

fn journal_failure(output: OutputMode, err: &JournalError) -> anyhow::Error {
    fail(output, &CliError::from(err))
}

/// Replay the journal into current issues.
pub fn load_issues(journal: &Journal, output: OutputMode) -> anyhow::Result<IssueMap> {
    journal
        .replay(ReplayOptions::default())
        .map(|replay| replay.issues)
        .map_err(|err| journal_failure(output, &err))
}

/// Current state of issue `id`, or an `E2001` error if it does not exist.
pub fn require_issue(journal: &Journal, id: &str, output: OutputMode) -> anyhow::Result<Issue> {
    load_issues(journal, output)?.remove(id).ok_or_else(|| {
        fail(
            output,
            &CliError::coded(ErrorCode::IssueNotFound, format!("issue '{id}' not found")),
        )
    })
}

/// Append one record.
pub fn append(journal: &Journal, record: &EventRecord, output: OutputMode) -> anyhow::Result<()> {
    journal
        .append(record)
        .map_err(|err| journal_failure(output, &err))
}

/// Append `record`, then reload the journal and return its issue.
pub fn commit(journal: &Journal, record: &EventRecord, output: OutputMode) -> anyhow::Result<Issue> {
    append(journal, record, output)?;
    load_issues(journal, output)?.remove(&record.id).ok_or_else(|| {
        fail(
            output,
            &CliError::coded(
                ErrorCode::InternalUnexpected,
                format!("issue '{}' missing after append", record.id),
            ),
        )
    })
}

/// Trim user input; blank input stays `Some("")`.
pub fn trimmed(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
}
