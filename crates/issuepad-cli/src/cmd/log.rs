//! `issuepad log`: list decodable journal events with their line numbers.

use crate::output::{CliError, OutputMode, Renderable, fail, render_list};
use clap::Args;
use issuepad_core::journal::{Journal, JournalEntry};
use issuepad_core::{Event, EventRecord};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Only events for this issue ID.
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    line: usize,
    #[serde(flatten)]
    record: EventRecord,
    #[serde(skip)]
    event: Event,
}

impl From<JournalEntry> for LogEntry {
    fn from(entry: JournalEntry) -> Self {
        Self {
            line: entry.line,
            record: EventRecord::from(&entry.event),
            event: entry.event,
        }
    }
}

impl Renderable for LogEntry {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let when = self
            .event
            .when_utc
            .map_or_else(|| "-".to_string(), super::show::local_datetime);
        write!(
            w,
            "{:>5}  {}  {:<7} {}",
            self.line,
            when,
            self.event.event_type(),
            self.event.id
        )?;
        if let Some(title) = &self.record.title {
            write!(w, "  {title}")?;
        }
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.line, self.event)
    }

    fn table_headers() -> &'static [&'static str] {
        &["LINE", "WHEN", "TYPE", "ID", "TITLE"]
    }
}

/// Journal events, optionally narrowed to one issue id.
fn entries(journal: &Journal, id: Option<&str>) -> Result<Vec<LogEntry>, CliError> {
    let events = journal.read_events().map_err(|err| CliError::from(&err))?;
    Ok(events
        .into_iter()
        .filter(|entry| id.is_none_or(|id| entry.event.id == id))
        .map(LogEntry::from)
        .collect())
}

pub fn run_log(args: &LogArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let id = args.id.as_deref().map(str::trim);
    let entries = entries(journal, id).map_err(|err| fail(output, &err))?;
    render_list(&entries, output)?;
    Ok(())
}
