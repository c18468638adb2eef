//! `issuepad resolve`: mark an issue as done.

use crate::output::{OutputMode, render_item};
use chrono::Utc;
use clap::Args;
use issuepad_core::journal::Journal;
use issuepad_core::{EventRecord, Issue};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Issue ID to resolve.
    pub id: String,
}

/// Append `resolve` (when `done`) or `reopen` for `issue` and render the result.
pub fn set_done(
    journal: &Journal,
    issue: &Issue,
    done: bool,
    output: OutputMode,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let record = if done {
        EventRecord::resolve(&issue.id, now)
    } else {
        EventRecord::reopen(&issue.id, now)
    };
    let updated = super::commit(journal, &record, output)?;
    render_item(&updated, output)?;
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let issue = super::require_issue(journal, args.id.trim(), output)?;
    set_done(journal, &issue, true, output)
}
