//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) that abstract
//! persistence operations. Implementations can use PostgreSQL or
//! in-memory storage.
//!
//! # Available Repositories
//!
//! - [`EventRepository`]: the event store (date → event)
//! - [`ParticipantRepository`]: participant rows of each event
//!
//! # Consistency
//!
//! Every method is atomic on its own. In particular
//! [`ParticipantRepository::remove_and_compact`] deletes a participant and
//! renumbers the rest as one unit, so readers never see a gap. Sequences of
//! calls (check, then insert) are made atomic by the caller, see
//! [`ParticipantRegistry`](crate::application::services::ParticipantRegistry).

use crate::domain::entities::{Event, Participant};
use crate::domain::value_objects::{EventDate, EventId, ExternalRef, Position, UserId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be converted into domain values.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if the backend could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The event store.
///
/// Maps a calendar date to a durable event identifier and an external
/// reference.
///
/// # Examples
///
/// ```ignore
/// use waitlist::infrastructure::persistence::traits::EventRepository;
///
/// async fn example(repo: &impl EventRepository) {
///     let event = repo.upsert(date, ExternalRef::from(1001)).await?;
///     let same = repo.get_by_date(date).await?;
///     assert_eq!(same.map(|e| e.id()), Some(event.id()));
/// }
/// ```
#[async_trait]
pub trait EventRepository: Send + Sync + fmt::Debug {
    /// Creates the event for `date`, or repoints the external reference of
    /// the existing one.
    ///
    /// Re-creating keeps the identifier, and therefore every participant
    /// attached to it.
    async fn upsert(&self, date: EventDate, external_ref: ExternalRef) -> RepositoryResult<Event>;

    /// Gets an event by date.
    ///
    /// Returns `None` if no event exists for the date.
    async fn get_by_date(&self, date: EventDate) -> RepositoryResult<Option<Event>>;

    /// Gets an event by identifier.
    ///
    /// Returns `None` if the event does not exist.
    async fn get(&self, id: EventId) -> RepositoryResult<Option<Event>>;
}

/// Storage of participant rows.
///
/// Implementations must uphold the uniqueness of `(event, user)` and
/// `(event, position)` and report violations as
/// [`RepositoryError::Duplicate`].
#[async_trait]
pub trait ParticipantRepository: Send + Sync + fmt::Debug {
    /// Finds the participant row of a user in an event.
    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Participant>>;

    /// Counts the participants of an event.
    async fn count(&self, event_id: EventId) -> RepositoryResult<u32>;

    /// Inserts a participant row.
    ///
    /// Stores shared between processes also reject a position that is no
    /// longer the tail of the list.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Duplicate` if the user or the position is taken
    /// - `RepositoryError::NotFound` if the event does not exist
    async fn insert(&self, participant: &Participant) -> RepositoryResult<()>;

    /// Removes a user from an event and moves every later participant one
    /// place up, as a single atomic operation.
    ///
    /// Returns the vacated position, or `None` if the user was not a member.
    async fn remove_and_compact(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Position>>;

    /// Lists the participants of an event ordered by position.
    async fn list(&self, event_id: EventId) -> RepositoryResult<Vec<Participant>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repository_error {
        use super::*;

        #[test]
        fn not_found_error() {
            let err = RepositoryError::not_found("Event", "42");
            assert!(err.is_not_found());
            assert!(!err.is_duplicate());
            assert!(err.to_string().contains("not found"));
            assert!(err.to_string().contains("Event"));
            assert!(err.to_string().contains("42"));
        }

        #[test]
        fn duplicate_error() {
            let err = RepositoryError::duplicate("Participant", "event 1 / user 7");
            assert!(!err.is_not_found());
            assert!(err.is_duplicate());
            assert!(err.to_string().contains("Duplicate"));
            assert!(err.to_string().contains("Participant"));
        }

        #[test]
        fn connection_error() {
            let err = RepositoryError::connection("Connection refused");
            assert!(err.is_connection());
            assert!(err.to_string().contains("refused"));
        }

        #[test]
        fn query_error() {
            let err = RepositoryError::query("Invalid SQL");
            assert!(err.to_string().contains("Query"));
            assert!(err.to_string().contains("Invalid SQL"));
        }

        #[test]
        fn serialization_error() {
            let err = RepositoryError::serialization("position 0");
            assert!(err.to_string().contains("Serialization"));
        }

        #[test]
        fn internal_error() {
            let err = RepositoryError::internal("Unexpected state");
            assert!(err.to_string().contains("Internal"));
        }
    }
}
