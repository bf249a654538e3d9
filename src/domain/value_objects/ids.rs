//! # Identifiers
//!
//! Newtype identifiers for events, users and external message handles.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::value_objects::{EventId, ExternalRef, UserId};
//!
//! let event = EventId::new(7);
//! let user = UserId::new(42).unwrap();
//! let handle = ExternalRef::from(1001_i64);
//!
//! assert_eq!(event.get(), 7);
//! assert_eq!(user.to_string(), "42");
//! assert_eq!(handle.as_str(), "1001");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Durable identifier of an event, assigned by the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a storage-assigned identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user on the messaging platform.
///
/// # Invariants
///
/// - Never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Creates a user id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUserId` if `id` is zero.
    pub const fn new(id: i64) -> DomainResult<Self> {
        if id == 0 {
            return Err(DomainError::InvalidUserId(id));
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to the external artifact that displays an event,
/// typically the handle of the chat message carrying its list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalRef(String);

impl ExternalRef {
    /// Creates an external reference.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ExternalRef {
    fn from(message_id: i64) -> Self {
        Self(message_id.to_string())
    }
}

impl From<&str> for ExternalRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
