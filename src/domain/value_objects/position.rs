//! # Position
//!
//! 1-based rank of a participant within an event's list.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::value_objects::Position;
//!
//! let first = Position::FIRST;
//! assert_eq!(first.get(), 1);
//! assert_eq!(Position::after(1).get(), 2);
//! assert!(first.previous().is_none());
//! assert!(Position::new(0).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// A 1-based ordinal position.
///
/// Positions of an event's participants always form the dense sequence
/// `1..=N` where `N` is the participant count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(NonZeroU32);

impl Position {
    /// The head of the list.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a position, returning `None` for zero.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the position that follows a list of `count` participants.
    #[inline]
    #[must_use]
    pub const fn after(count: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(count))
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the previous position, or `None` at the head of the list.
    #[inline]
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl TryFrom<i32> for Position {
    type Error = crate::domain::errors::DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(crate::domain::errors::DomainError::InvalidPosition(i64::from(value)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
