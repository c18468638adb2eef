//! Append-only journal file: writer and state reconstructor.
//!
//! The journal is a UTF-8 text file holding one JSON event record per line.
//! It is the only persisted state. Every load re-reads it from the first
//! line; nothing is cached between calls.
//!
//! # Invariants
//!
//! - Lines are only ever appended. Existing bytes are never rewritten,
//!   truncated, or reordered; deletion is itself an appended event.
//! - Each append serializes the whole line before opening the file, then
//!   writes it with a single `write_all` under `O_APPEND` and flushes. A
//!   record that fails to serialize writes nothing.
//! - If the file does not end with a newline (a torn previous write), the
//!   next append starts with one, so the torn fragment stays an isolated
//!   malformed line instead of corrupting the new record.
//! - Loading an absent file yields empty state. Malformed lines are skipped
//!   and logged, never surfaced as errors.
//! - No file lock is taken. One writer at a time is assumed.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::event::{DecodeError, Event, EventRecord, ParsedLine, WriteError, parse_line, write_line};
use crate::fold::{self, Applied, IssueMap};
use crate::model::Issue;

/// Errors surfaced by journal operations.
///
/// Only storage and encoding failures are errors. Malformed lines and
/// events naming unknown ids are resolved during replay.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Creating, opening, or writing the journal failed.
    #[error("failed to append to journal {}: {source}", path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Opening or reading the journal failed.
    #[error("failed to read journal {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record could not be serialized; nothing was written.
    #[error(transparent)]
    Encode(#[from] WriteError),
}

impl JournalError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Append { .. } => ErrorCode::JournalWriteFailed,
            Self::Read { .. } => ErrorCode::JournalReadFailed,
            Self::Encode(_) => ErrorCode::EventEncodeFailed,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Options for [`Journal::replay`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Creation time for `add` events without `whenUtc`. Defaults to the
    /// moment the replay starts.
    pub now: Option<DateTime<Utc>>,
    /// Stop after this many physical lines, reconstructing the state as of
    /// that prefix of the journal.
    pub max_lines: Option<usize>,
}

/// Counters collected during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Physical lines read, blank ones included.
    pub lines: usize,
    /// Events that changed state.
    pub applied: usize,
    /// Events that named an id absent from current state.
    pub noops: usize,
    /// Non-blank lines that could not be decoded.
    pub skipped: usize,
}

/// Result of folding the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub issues: IssueMap,
    pub stats: ReplayStats,
}

impl Replay {
    /// Current issues in ascending id order.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.into_values().collect()
    }
}

/// A decoded event together with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub line: usize,
    pub event: Event,
}

/// Handle to a journal file. Holds only its location and write options.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    durable: bool,
}

impl Journal {
    /// Journal at `path`. Relative paths are made absolute against the
    /// current directory. Nothing is created until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self {
            path,
            durable: false,
        }
    }

    /// Also `fsync` the file data after every append.
    #[must_use]
    pub const fn durable(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    /// Absolute location of the journal file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Writer
    // -----------------------------------------------------------------------

    /// Append one event record.
    ///
    /// Creates the file and its parent directories if needed. Once this
    /// returns `Ok`, any later load observes the event.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Encode`] if the record cannot be serialized
    /// (the file is not touched), or [`JournalError::Append`] on any I/O
    /// failure.
    pub fn append(&self, record: &EventRecord) -> Result<(), JournalError> {
        let line = write_line(record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.append_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.append_error(e))?;

        let needs_separator = ends_without_newline(&mut file).map_err(|e| self.append_error(e))?;
        if needs_separator {
            warn!(
                path = %self.path.display(),
                "journal does not end with a newline; isolating torn trailing line"
            );
        }

        let bytes = if needs_separator {
            format!("\n{line}")
        } else {
            line
        };

        file.write_all(bytes.as_bytes())
            .map_err(|e| self.append_error(e))?;
        file.flush().map_err(|e| self.append_error(e))?;

        if self.durable {
            file.sync_data().map_err(|e| self.append_error(e))?;
        }

        debug!(
            event_type = %record.event_type,
            id = %record.id,
            "appended journal event"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reconstructor
    // -----------------------------------------------------------------------

    /// Fold the full journal into the current issue set.
    ///
    /// The returned order is ascending id; callers that display issues
    /// should apply their own ordering.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Read`] if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<Vec<Issue>, JournalError> {
        Ok(self.replay(ReplayOptions::default())?.into_issues())
    }

    /// Fold the journal (or a prefix of it) and report replay counters.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Read`] if the file exists but cannot be read.
    pub fn replay(&self, options: ReplayOptions) -> Result<Replay, JournalError> {
        let now = options.now.unwrap_or_else(Utc::now);
        let mut issues = IssueMap::new();
        let mut stats = ReplayStats::default();

        self.scan(options.max_lines, |line_no, parsed| {
            stats.lines = line_no;
            match parsed {
                Ok(ParsedLine::Event(event)) => match fold::apply(&mut issues, &event, now) {
                    Applied::Changed => stats.applied += 1,
                    Applied::NoOp => {
                        stats.noops += 1;
                        debug!(
                            line = line_no,
                            event_type = %event.event_type(),
                            id = %event.id,
                            "event references unknown id; ignored"
                        );
                    }
                },
                Ok(ParsedLine::Blank) => {}
                Err(err) => {
                    stats.skipped += 1;
                    self.log_skipped(line_no, &err);
                }
            }
        })?;

        debug!(
            path = %self.path.display(),
            lines = stats.lines,
            applied = stats.applied,
            noops = stats.noops,
            skipped = stats.skipped,
            issues = issues.len(),
            "replayed journal"
        );

        Ok(Replay { issues, stats })
    }

    /// Every decodable event in file order, with its line number.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Read`] if the file exists but cannot be read.
    pub fn read_events(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let mut entries = Vec::new();
        self.scan(None, |line, parsed| match parsed {
            Ok(ParsedLine::Event(event)) => entries.push(JournalEntry { line, event }),
            Ok(ParsedLine::Blank) => {}
            Err(err) => self.log_skipped(line, &err),
        })?;
        Ok(entries)
    }

    /// Every id named by any decodable event, including deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Read`] if the file exists but cannot be read.
    pub fn known_ids(&self) -> Result<HashSet<String>, JournalError> {
        Ok(self
            .read_events()?
            .into_iter()
            .map(|entry| entry.event.id)
            .collect())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Decode lines in file order, stopping after `max_lines` if given.
    fn scan(
        &self,
        max_lines: Option<usize>,
        mut visit: impl FnMut(usize, Result<ParsedLine, DecodeError>),
    ) -> Result<(), JournalError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "journal absent; empty state");
                return Ok(());
            }
            Err(e) => return Err(self.read_error(e)),
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut line_no = 0;

        while max_lines.is_none_or(|max| line_no < max) {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.read_error(e))?;
            if n == 0 {
                break;
            }
            line_no += 1;

            let parsed = std::str::from_utf8(&buf)
                .map_err(|_| DecodeError::InvalidUtf8)
                .and_then(parse_line);
            visit(line_no, parsed);
        }

        Ok(())
    }

    fn log_skipped(&self, line: usize, err: &DecodeError) {
        warn!(
            path = %self.path.display(),
            line,
            error = %err,
            "skipping malformed journal line"
        );
    }

    fn append_error(&self, source: io::Error) -> JournalError {
        JournalError::Append {
            path: self.path.clone(),
            source,
        }
    }

    fn read_error(&self, source: io::Error) -> JournalError {
        JournalError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

/// True when `file` is non-empty and its last byte is not `\n`.
fn ends_without_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
