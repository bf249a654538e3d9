//! # Event Entity
//!
//! One occurrence of a recurring sign-up list.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::entities::Event;
//! use waitlist::domain::value_objects::{EventDate, EventId, ExternalRef, Timestamp};
//!
//! let event = Event::new(
//!     EventId::new(1),
//!     "2024-01-07".parse::<EventDate>().unwrap(),
//!     ExternalRef::from(12345_i64),
//!     Timestamp::now(),
//! );
//!
//! assert_eq!(event.date().to_string(), "2024-01-07");
//! ```

use crate::domain::value_objects::{EventDate, EventId, ExternalRef, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar event with its own participant list.
///
/// # Invariants
///
/// - At most one event exists per [`EventDate`]
/// - The identifier never changes once assigned, including when the event
///   is re-created for the same date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    date: EventDate,
    external_ref: ExternalRef,
    created_at: Timestamp,
}

impl Event {
    /// Creates an event from its stored attributes.
    #[must_use]
    pub fn new(
        id: EventId,
        date: EventDate,
        external_ref: ExternalRef,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            date,
            external_ref,
            created_at,
        }
    }

    /// Returns the event identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the date keying this event.
    #[inline]
    #[must_use]
    pub fn date(&self) -> EventDate {
        self.date
    }

    /// Returns the external reference.
    #[inline]
    #[must_use]
    pub fn external_ref(&self) -> &ExternalRef {
        &self.external_ref
    }

    /// Returns when the event was first created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Repoints the external reference, keeping identity and history.
    pub fn set_external_ref(&mut self, external_ref: ExternalRef) {
        self.external_ref = external_ref;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({} on {})", self.id, self.date)
    }
}
