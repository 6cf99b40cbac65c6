// File: src/error.rs
// Purpose: Operational errors (never validation failures)

use thiserror::Error;

/// Errors raised outside the rule set itself.
///
/// A field that fails its rule is reported through a [`crate::Verdict`],
/// not through this type.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown field id: {0}")]
    UnknownField(String),

    #[error("unknown choice group: {0}")]
    UnknownGroup(String),

    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("failed to parse form snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
