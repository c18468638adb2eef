//! `issuepad show`: display full details of a single issue.
//!
//! Also home to the [`Renderable`] impl for [`Issue`], which every mutating
//! command reuses to print the issue it just changed.

use crate::output::{OutputMode, Renderable, pretty_kv, pretty_section, render_item};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use issuepad_core::Issue;
use issuepad_core::journal::Journal;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue ID to display.
    pub id: String,
}

pub fn local_datetime(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Renderable for Issue {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_section(w, &self.title)?;
        pretty_kv(w, "ID", &self.id)?;
        pretty_kv(w, "Status", self.status_str())?;
        if !self.application.is_empty() {
            pretty_kv(w, "App", &self.application)?;
        }
        pretty_kv(w, "Created", local_datetime(self.created_utc))?;
        if !self.description.is_empty() {
            writeln!(w)?;
            pretty_section(w, "Description")?;
            writeln!(w, "{}", self.description)?;
        }
        if !self.notes.is_empty() {
            writeln!(w)?;
            pretty_section(w, "Notes")?;
            writeln!(w, "{}", self.notes)?;
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            self.id,
            self.status_str(),
            self.application,
            self.title,
            self.created_utc.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "APP", "TITLE", "CREATED"]
    }
}

/// Execute `issuepad show <id>`.
///
/// # Errors
///
/// Returns an error if the journal cannot be read, the issue does not
/// exist, or output rendering fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let issue = super::require_issue(journal, args.id.trim(), output)?;
    render_item(&issue, output)?;
    Ok(())
}
