//! issuepad-core library.
//!
//! An append-only event journal and the state reconstructor that folds it
//! into current issues.
//!
//! - [`journal::Journal::append`] records one event per call.
//! - [`journal::Journal::load_all`] replays the whole journal into issues.
//! - [`journal::Journal::path`] exposes the journal location.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for journal operations; `anyhow`
//!   for configuration loading.
//! - **Logging**: `tracing` macros (`debug!` on append/replay, `warn!` on
//!   skipped lines).

pub mod config;
pub mod error;
pub mod event;
pub mod fold;
pub mod journal;
pub mod model;

pub use event::{Event, EventRecord, EventType, IssueFields};
pub use journal::{Journal, JournalError, Replay, ReplayOptions, ReplayStats};
pub use model::Issue;
