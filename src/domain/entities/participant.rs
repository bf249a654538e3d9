//! # Participant Entity
//!
//! A user's membership record in an event's list.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::entities::UserProfile;
//! use waitlist::domain::value_objects::UserId;
//!
//! let profile = UserProfile::new(UserId::new(7).unwrap())
//!     .with_given_name("Ada")
//!     .with_family_name("Lovelace")
//!     .with_handle("ada");
//!
//! assert_eq!(profile.display_name(), "Ada Lovelace (@ada)");
//! ```

use crate::domain::value_objects::{EventId, Position, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata of a user, as reported by the messaging platform.
///
/// Empty strings are normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    handle: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl UserProfile {
    /// Creates a profile carrying only the user id.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            handle: None,
            given_name: None,
            family_name: None,
        }
    }

    /// Sets the handle (without a leading `@`).
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = non_empty(handle);
        self
    }

    /// Sets the given name.
    #[must_use]
    pub fn with_given_name(mut self, name: impl Into<String>) -> Self {
        self.given_name = non_empty(name);
        self
    }

    /// Sets the family name.
    #[must_use]
    pub fn with_family_name(mut self, name: impl Into<String>) -> Self {
        self.family_name = non_empty(name);
        self
    }

    /// Returns the user id.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Returns the given name, if any.
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    /// Returns the family name, if any.
    #[must_use]
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Returns the name shown in rendered lists.
    ///
    /// - full name and handle: `Ada Lovelace (@ada)`
    /// - handle only: `@ada`
    /// - name only: `Ada Lovelace`
    /// - neither: `User 7`
    #[must_use]
    pub fn display_name(&self) -> String {
        let full_name = format!(
            "{} {}",
            self.given_name.as_deref().unwrap_or_default(),
            self.family_name.as_deref().unwrap_or_default()
        );
        let full_name = full_name.trim();

        match (full_name.is_empty(), self.handle.as_deref()) {
            (true, Some(handle)) => format!("@{handle}"),
            (false, Some(handle)) => format!("{full_name} (@{handle})"),
            (true, None) => format!("User {}", self.user_id),
            (false, None) => full_name.to_string(),
        }
    }
}

/// A member of an event's list.
///
/// # Invariants
///
/// - `(event_id, user_id)` is unique
/// - positions of an event's participants are exactly `1..=N`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    event_id: EventId,
    profile: UserProfile,
    position: Position,
    joined_at: Timestamp,
}

impl Participant {
    /// Creates a participant record.
    #[must_use]
    pub fn new(
        event_id: EventId,
        profile: UserProfile,
        position: Position,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            event_id,
            profile,
            position,
            joined_at,
        }
    }

    /// Returns the event this participant belongs to.
    #[inline]
    #[must_use]
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the participant's user id.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.profile.user_id
    }

    /// Returns the display metadata.
    #[inline]
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns when the participant joined.
    #[inline]
    #[must_use]
    pub fn joined_at(&self) -> Timestamp {
        self.joined_at
    }

    /// Moves the participant one place towards the head of the list.
    ///
    /// Returns false (and leaves the position unchanged) at the head.
    pub fn move_up(&mut self) -> bool {
        match self.position.previous() {
            Some(previous) => {
                self.position = previous;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.position, self.profile.display_name())
    }
}
