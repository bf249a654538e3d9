//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Expected registry results (already joined, list full, not a member) are
//! not errors; they are [`JoinOutcome`](crate::domain::outcomes::JoinOutcome)
//! and [`LeaveOutcome`](crate::domain::outcomes::LeaveOutcome) variants.
//! This module covers the rest: invalid input, a date with no event, and
//! infrastructure faults.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)             - Invalid domain values
//! ├── Infrastructure(InfrastructureError)
//! │   ├── Repository(RepositoryError) - Storage faults
//! │   └── Configuration(String)       - Invalid settings
//! └── EventNotFound { date }          - No event for a date
//! ```
//!
//! # Examples
//!
//! ```
//! use waitlist::application::error::{ApplicationError, InfrastructureError};
//! use waitlist::infrastructure::persistence::RepositoryError;
//!
//! let err: ApplicationError = RepositoryError::connection("refused").into();
//! assert!(err.is_retryable());
//!
//! let err = ApplicationError::event_not_found("2024-01-07");
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Represents failures of storage and of process configuration.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InfrastructureError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if retrying the whole request may succeed.
    ///
    /// Only an unreachable store qualifies; constraint conflicts and bad
    /// configuration will fail again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_connection())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain validation error.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from storage or configuration.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// No event exists for the requested date.
    #[error("event not found for date {date}")]
    EventNotFound {
        /// The requested date.
        date: String,
    },
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        Self::Infrastructure(InfrastructureError::Repository(error))
    }
}

impl ApplicationError {
    /// Creates an event not found error.
    #[must_use]
    pub fn event_not_found(date: impl ToString) -> Self {
        Self::EventNotFound {
            date: date.to_string(),
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Infrastructure(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound { .. })
    }

    /// Returns true if this error comes from storage.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    // InfrastructureError tests

    #[test]
    fn infrastructure_error_configuration() {
        let err = InfrastructureError::configuration("capacity must be positive");
        assert!(err.to_string().contains("configuration"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn infrastructure_error_from_repository_error() {
        let repo_err = RepositoryError::not_found("Event", "42");
        let infra_err: InfrastructureError = repo_err.into();
        assert!(infra_err.to_string().contains("42"));
        assert!(!infra_err.is_retryable());
    }

    #[test]
    fn connection_faults_are_retryable() {
        let infra_err: InfrastructureError = RepositoryError::connection("refused").into();
        assert!(infra_err.is_retryable());
    }

    // ApplicationError tests

    #[test]
    fn application_error_event_not_found() {
        let err = ApplicationError::event_not_found("2024-01-07");
        assert!(err.to_string().contains("2024-01-07"));
        assert!(err.is_not_found());
        assert!(!err.is_infrastructure());
    }

    #[test]
    fn application_error_from_domain_error() {
        let app_err: ApplicationError = DomainError::InvalidUserId(0).into();
        assert!(matches!(app_err, ApplicationError::Domain(DomainError::InvalidUserId(0))));
        assert!(app_err.to_string().contains("user id"));
        assert!(!app_err.is_retryable());
    }

    #[test]
    fn application_error_from_repository_error() {
        let app_err: ApplicationError = RepositoryError::duplicate("Participant", "1/2").into();
        assert!(app_err.is_infrastructure());
        assert!(app_err.to_string().contains("infrastructure"));
        assert!(!app_err.is_retryable());
    }

    #[test]
    fn application_error_retryable_from_connection() {
        let app_err: ApplicationError = RepositoryError::connection("pool timed out").into();
        assert!(app_err.is_retryable());
    }
}
