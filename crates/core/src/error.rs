//! Invocation error model.

use thiserror::Error;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Invocation-level error.
///
/// Every variant aborts the whole invocation: the host discards all writes
/// attempted by a failed invocation, so no partially applied state ever
/// commits. Messages carry the failing key or identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed input (wrong argument count/shape, non-numeric field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Duplicate create (a row with the same composite key already exists).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced entity or row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A state-machine guard rejected the requested transition.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A stored payload did not match the expected record shape.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
