//! # Domain Errors
//!
//! Validation failures raised while constructing domain values.

use thiserror::Error;

/// Error raised when a domain value fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// User identifiers must be nonzero.
    #[error("invalid user id: {0} (must be nonzero)")]
    InvalidUserId(i64),

    /// Event dates must be ISO calendar dates (`YYYY-MM-DD`).
    #[error("invalid event date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Positions are 1-based.
    #[error("invalid position: {0} (positions start at 1)")]
    InvalidPosition(i64),

    /// Capacity must be a positive integer.
    #[error("invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(u32),
}

impl DomainError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }
}

/// Result type for domain validation.
pub type DomainResult<T> = Result<T, DomainError>;
