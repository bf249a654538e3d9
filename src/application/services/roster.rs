//! # Roster
//!
//! Renderable snapshot of an event's participant list.
//!
//! ```text
//! Sign-up list for 2024-01-07
//! Spots: 2/18
//!
//! 1. Ada Lovelace (@ada)
//! 2. @grace
//! ```

use crate::domain::entities::Participant;
use crate::domain::value_objects::EventDate;
use std::fmt;

/// Hint shown instead of participant lines when nobody has joined.
pub const EMPTY_LIST_HINT: &str = "The list is empty. Press \"Join\" to sign up!";

/// Snapshot of an event's list at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    date: EventDate,
    capacity: u32,
    participants: Vec<Participant>,
}

impl Roster {
    /// Creates a roster; `participants` must be ordered by position.
    #[must_use]
    pub fn new(date: EventDate, capacity: u32, participants: Vec<Participant>) -> Self {
        Self {
            date,
            capacity,
            participants,
        }
    }

    /// Returns the capacity the roster was rendered against.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if nobody has joined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sign-up list for {}", self.date)?;
        writeln!(f, "Spots: {}/{}", self.participants.len(), self.capacity)?;
        writeln!(f)?;

        if self.participants.is_empty() {
            return write!(f, "{EMPTY_LIST_HINT}");
        }

        let mut lines = self.participants.iter().peekable();
        while let Some(participant) = lines.next() {
            write!(f, "{participant}")?;
            if lines.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
