//! `issuepad list`: list issues with filtering.
//!
//! Issues are sorted by application, then title (both case-insensitive),
//! then newest first. Totals always cover the whole state, not just the
//! filtered rows.

use crate::output::{CliError, OutputMode, fail, pretty_rule, render_mode, write_list};
use clap::Args;
use issuepad_core::Issue;
use issuepad_core::journal::{Journal, ReplayOptions};
use serde::Serialize;
use std::cmp::Ordering;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only issues of this application (case-insensitive).
    #[arg(short, long = "app")]
    pub application: Option<String>,

    /// Only issues with exactly this title (case-insensitive).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Only open issues.
    #[arg(long)]
    pub open: bool,

    /// Show the state as of the first N journal lines.
    #[arg(long, value_name = "N")]
    pub upto: Option<usize>,
}

/// Counts over every issue in the replayed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: usize,
    pub open: usize,
    pub done: usize,
}

impl Totals {
    pub fn of<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        issues.into_iter().fold(Self::default(), |mut t, issue| {
            t.total += 1;
            if issue.done {
                t.done += 1;
            } else {
                t.open += 1;
            }
            t
        })
    }
}

#[derive(Debug, Serialize)]
struct ListResponse {
    issues: Vec<Issue>,
    shown: usize,
    #[serde(flatten)]
    totals: Totals,
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.trim().to_lowercase()
}

impl ListArgs {
    fn matches(&self, issue: &Issue) -> bool {
        if self.open && issue.done {
            return false;
        }
        let app_ok = self
            .application
            .as_deref()
            .is_none_or(|app| same_text(&issue.application, app));
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|title| same_text(&issue.title, title));
        app_ok && title_ok
    }
}

/// Display order: application, title, then most recently created first.
pub fn display_order(a: &Issue, b: &Issue) -> Ordering {
    a.application
        .to_lowercase()
        .cmp(&b.application.to_lowercase())
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| b.created_utc.cmp(&a.created_utc))
        .then_with(|| a.id.cmp(&b.id))
}

/// Filter and sort `issues` for display.
pub fn select(issues: Vec<Issue>, args: &ListArgs) -> Vec<Issue> {
    let mut selected: Vec<Issue> = issues.into_iter().filter(|i| args.matches(i)).collect();
    selected.sort_by(display_order);
    selected
}

fn write_pretty(r: &ListResponse, w: &mut dyn Write) -> io::Result<()> {
    for issue in &r.issues {
        let mark = if issue.done { "✓" } else { " " };
        let app = if issue.application.is_empty() {
            "-"
        } else {
            issue.application.as_str()
        };
        writeln!(w, "[{mark}] {}  {app:<16} {}", issue.id, issue.title)?;
    }
    pretty_rule(w)?;
    writeln!(
        w,
        "Shown: {}  Total: {}  Open: {}  Done: {}",
        r.shown, r.totals.total, r.totals.open, r.totals.done
    )
}

fn write_text(r: &ListResponse, w: &mut dyn Write) -> io::Result<()> {
    write_list(w, &r.issues, OutputMode::Text)?;
    writeln!(
        w,
        "# total={} open={} done={}",
        r.totals.total, r.totals.open, r.totals.done
    )
}

/// Execute `issuepad list`.
///
/// # Errors
///
/// Returns an error if the journal cannot be read or output rendering fails.
pub fn run_list(args: &ListArgs, output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let replay = journal
        .replay(ReplayOptions {
            max_lines: args.upto,
            ..ReplayOptions::default()
        })
        .map_err(|err| fail(output, &CliError::from(&err)))?;
    let all = replay.into_issues();
    let totals = Totals::of(&all);
    let issues = select(all, args);

    let response = ListResponse {
        shown: issues.len(),
        issues,
        totals,
    };
    render_mode(output, &response, write_text, write_pretty)
}
