//! `issuepad path`: print where the journal lives.

use crate::output::{OutputMode, render};
use issuepad_core::journal::Journal;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct PathInfo {
    path: PathBuf,
    exists: bool,
}

pub fn run_path(output: OutputMode, journal: &Journal) -> anyhow::Result<()> {
    let info = PathInfo {
        path: journal.path().to_path_buf(),
        exists: journal.path().is_file(),
    };
    render(output, &info, |i, w| writeln!(w, "{}", i.path.display()))
}
