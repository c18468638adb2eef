pub mod id;
pub mod issue;

pub use id::{next_issue_id, timestamp_id};
pub use issue::{Issue, UNTITLED};
