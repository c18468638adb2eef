//! `issuepad delete`: remove an issue from the current state.
//!
//! The journal keeps every earlier event; a later `add` with the same id
//! brings the issue back as a fresh one.

use crate::output::{OutputMode, render};
use chrono::Utc;
use clap::Args;
use issuepad_core::EventRecord;
use issuepad_core::journal::Journal;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Issue ID to delete.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct DeleteResult {
    id: String,
    deleted: bool,
    remaining: usize,
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let issue = super::require_issue(journal, args.id.trim(), output)?;
    super::append(journal, &EventRecord::delete(&issue.id, Utc::now()), output)?;
    let remaining = super::load_issues(journal, output)?.len();
    tracing::info!(id = %issue.id, "deleted issue");

    let result = DeleteResult {
        id: issue.id,
        deleted: true,
        remaining,
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ Deleted {} ({} remaining)", r.id, r.remaining)
    })
}
