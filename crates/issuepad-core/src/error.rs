use std::fmt;

/// Machine-readable error codes for scripts and agents driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    JournalPathUnavailable,
    IssueNotFound,
    EmptyTitle,
    NothingToUpdate,
    JournalWriteFailed,
    JournalReadFailed,
    EventEncodeFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::JournalPathUnavailable => "E1002",
            Self::IssueNotFound => "E2001",
            Self::EmptyTitle => "E2002",
            Self::NothingToUpdate => "E2003",
            Self::JournalWriteFailed => "E5001",
            Self::JournalReadFailed => "E5002",
            Self::EventEncodeFailed => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::JournalPathUnavailable => "Journal location could not be resolved",
            Self::IssueNotFound => "Issue not found",
            Self::EmptyTitle => "Title is required",
            Self::NothingToUpdate => "No fields to update",
            Self::JournalWriteFailed => "Journal write failed",
            Self::JournalReadFailed => "Journal read failed",
            Self::EventEncodeFailed => "Event could not be encoded",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in issuepad/config.toml and retry."),
            Self::JournalPathUnavailable => {
                Some("Pass --journal or set ISSUEPAD_JOURNAL to an explicit file path.")
            }
            Self::IssueNotFound => Some("Run `issuepad list` to see current issue ids."),
            Self::EmptyTitle => Some("Pass a non-empty --title."),
            Self::NothingToUpdate => {
                Some("Pass at least one of --title, --app, --description, --notes.")
            }
            Self::JournalWriteFailed => Some("Check disk space and write permissions."),
            Self::JournalReadFailed => Some("Check that the journal file is readable."),
            Self::EventEncodeFailed | Self::InternalUnexpected => {
                Some("Retry once. If persistent, report a bug with logs.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
