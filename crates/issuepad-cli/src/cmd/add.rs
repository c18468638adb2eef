//! `issuepad add`: record a new issue.

use crate::output::{CliError, OutputMode, fail, render_item};
use chrono::Utc;
use clap::Args;
use issuepad_core::error::ErrorCode;
use issuepad_core::journal::Journal;
use issuepad_core::model::next_issue_id;
use issuepad_core::{EventRecord, IssueFields};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title of the new issue.
    #[arg(short, long)]
    pub title: String,

    /// Application the issue belongs to.
    #[arg(short, long = "app")]
    pub application: Option<String>,

    /// Description text.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Free-form notes.
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl AddArgs {
    /// Trimmed fields for the `add` event.
    pub fn fields(&self) -> IssueFields {
        IssueFields {
            application: super::trimmed(self.application.as_deref()),
            title: super::trimmed(Some(&self.title)),
            description: super::trimmed(self.description.as_deref()),
            notes: super::trimmed(self.notes.as_deref()),
        }
    }
}

/// Execute `issuepad add`.
///
/// # Errors
///
/// Returns an error if the title is blank, the journal cannot be read or
/// written, or output rendering fails.
pub fn run_add(args: &AddArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let fields = args.fields();
    if fields.title.as_deref().is_none_or(str::is_empty) {
        return Err(fail(
            output,
            &CliError::coded(ErrorCode::EmptyTitle, "title must not be empty"),
        ));
    }

    let taken = journal
        .known_ids()
        .map_err(|err| fail(output, &CliError::from(&err)))?;
    let now = Utc::now();
    let id = next_issue_id(now, &taken);

    let issue = super::commit(journal, &EventRecord::add(id, fields, now), output)?;
    tracing::info!(id = %issue.id, "added issue");
    render_item(&issue, output)?;
    Ok(())
}
