//! `issuepad update`: change fields of an existing issue.
//!
//! Only the flags actually passed end up in the event; the rest of the
//! issue is left as it was.

use crate::output::{CliError, OutputMode, fail, render_item};
use chrono::Utc;
use clap::Args;
use issuepad_core::error::ErrorCode;
use issuepad_core::journal::Journal;
use issuepad_core::{EventRecord, IssueFields};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Issue ID to update.
    pub id: String,

    /// New title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// New application.
    #[arg(short, long = "app")]
    pub application: Option<String>,

    /// New description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// New notes.
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl UpdateArgs {
    pub fn fields(&self) -> IssueFields {
        IssueFields {
            application: super::trimmed(self.application.as_deref()),
            title: super::trimmed(self.title.as_deref()),
            description: super::trimmed(self.description.as_deref()),
            notes: super::trimmed(self.notes.as_deref()),
        }
    }
}

fn validate(fields: &IssueFields) -> Result<(), CliError> {
    if fields.is_empty() {
        return Err(CliError::coded(
            ErrorCode::NothingToUpdate,
            "no fields to update",
        ));
    }
    if fields.title.as_deref() == Some("") {
        return Err(CliError::coded(
            ErrorCode::EmptyTitle,
            "title must not be empty",
        ));
    }
    Ok(())
}

/// Execute `issuepad update <id>`.
///
/// # Errors
///
/// Returns an error if no field was supplied, the new title is blank, the
/// issue does not exist, or the journal cannot be read or written.
pub fn run_update(args: &UpdateArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let fields = args.fields();
    validate(&fields).map_err(|err| fail(output, &err))?;

    let current = super::require_issue(journal, args.id.trim(), output)?;
    let issue = super::commit(
        journal,
        &EventRecord::update(current.id, fields, Utc::now()),
        output,
    )?;
    render_item(&issue, output)?;
    Ok(())
}
