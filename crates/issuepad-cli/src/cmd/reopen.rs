//! `issuepad reopen`: mark a resolved issue as open again.

use crate::output::OutputMode;
use clap::Args;
use issuepad_core::journal::Journal;

#[derive(Args, Debug)]
pub struct ReopenArgs {
    /// Issue ID to reopen.
    pub id: String,
}

pub fn run_reopen(args: &ReopenArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let issue = super::require_issue(journal, args.id.trim(), output)?;
    super::resolve::set_done(journal, &issue, false, output)
}
