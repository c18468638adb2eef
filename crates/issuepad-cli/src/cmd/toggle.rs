//! `issuepad toggle`: resolve an open issue or reopen a resolved one.

use crate::output::OutputMode;
use clap::Args;
use issuepad_core::journal::Journal;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Issue ID to toggle.
    pub id: String,
}

pub fn run_toggle(args: &ToggleArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let issue = super::require_issue(journal, args.id.trim(), output)?;
    super::resolve::set_done(journal, &issue, issue.is_open(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use issuepad_core::{EventRecord, IssueFields};

    #[test]
    fn toggle_twice_returns_to_open() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let journal = Journal::new(tmp.path().join("issues.jsonl"));
        journal
            .append(&EventRecord::add("x", IssueFields::titled("T"), Utc::now()))
            .expect("append");
        let args = ToggleArgs { id: "x".into() };

        run_toggle(&args, OutputMode::Json, &journal).expect("toggle");
        assert!(journal.load_all().expect("load")[0].done);

        run_toggle(&args, OutputMode::Json, &journal).expect("toggle");
        assert!(!journal.load_all().expect("load")[0].done);

        let events = journal.read_events().expect("events");
        let types: Vec<String> = events
            .iter()
            .map(|e| e.event.event_type().to_string())
            .collect();
        assert_eq!(types, ["add", "resolve", "reopen"]);
    }
}
