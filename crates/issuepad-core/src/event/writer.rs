//! Journal line writer/serializer.
//!
//! Serializes an [`EventRecord`] to one compact JSON object per line.
//! Guarantees:
//!
//! - One-line invariant: no literal `\n` or `\r` in the serialized JSON.
//!   Newlines inside string values are escaped by `serde_json`; the check
//!   is enforced anyway so a bad line can never reach the file.
//! - Deterministic: same record always produces the same bytes. Keys are
//!   written in declaration order (`type`, `id`, text fields, `whenUtc`).
//! - Absent optional fields are omitted, never written as `null`.

use super::EventRecord;

/// Errors that can occur during event writing.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The serialized JSON contained a literal line break.
    #[error("JSON payload contains literal newline: one-line invariant violated")]
    NewlineInPayload,

    /// Failed to serialize the record to JSON.
    #[error("failed to serialize event record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialize an [`EventRecord`] to a single JSON line (without trailing newline).
///
/// # Errors
///
/// Returns [`WriteError::NewlineInPayload`] if the JSON contains a line
/// break, or [`WriteError::Serialize`] if serialization fails.
pub fn to_json_line(record: &EventRecord) -> Result<String, WriteError> {
    let json = serde_json::to_string(record)?;

    if json.contains('\n') || json.contains('\r') {
        return Err(WriteError::NewlineInPayload);
    }

    Ok(json)
}

/// Serialize an [`EventRecord`] to a journal line with trailing newline.
///
/// This is the exact byte sequence the journal appends.
///
/// # Errors
///
/// Same as [`to_json_line`].
pub fn write_line(record: &EventRecord) -> Result<String, WriteError> {
    let mut line = to_json_line(record)?;
    line.push('\n');
    Ok(line)
}
