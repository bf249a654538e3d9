//! # Registry Outcomes
//!
//! Typed results of join and leave requests.
//!
//! Already-joined, full and not-a-member are expected results, not errors:
//! each maps to a specific message for the user.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::outcomes::JoinOutcome;
//! use waitlist::domain::value_objects::Position;
//!
//! let outcome = JoinOutcome::Joined { position: Position::FIRST };
//! assert!(outcome.is_joined());
//! assert_eq!(outcome.position(), Some(Position::FIRST));
//!
//! let full = JoinOutcome::Full { capacity: 18 };
//! assert_eq!(full.position(), None);
//! ```

use crate::domain::value_objects::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JoinOutcome {
    /// The user was added at the end of the list.
    Joined {
        /// Assigned position (`N + 1`).
        position: Position,
    },
    /// The user was already on the list; nothing changed.
    AlreadyJoined {
        /// The user's current position.
        position: Position,
    },
    /// The list is at capacity; nothing changed.
    Full {
        /// The capacity that was reached.
        capacity: u32,
    },
}

impl JoinOutcome {
    /// Returns the position the user holds after the request, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Joined { position } | Self::AlreadyJoined { position } => Some(*position),
            Self::Full { .. } => None,
        }
    }

    /// Returns true if the request added the user.
    #[inline]
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        matches!(self, Self::Joined { .. })
    }
}

impl fmt::Display for JoinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined { position } => write!(f, "You are signed up at position {position}!"),
            Self::AlreadyJoined { position } => {
                write!(f, "You are already signed up at position {position}")
            }
            Self::Full { .. } => write!(f, "The list is full!"),
        }
    }
}

/// Result of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeaveOutcome {
    /// The user was removed and later participants moved up.
    Left {
        /// The position the user vacated.
        position: Position,
    },
    /// The user was not on the list; nothing changed.
    NotAMember,
}

impl LeaveOutcome {
    /// Returns true if the request removed the user.
    #[inline]
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left { .. })
    }
}

impl fmt::Display for LeaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left { .. } => write!(f, "You have been removed from the list!"),
            Self::NotAMember => write!(f, "You are not on the list"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pos(n: u32) -> Position {
        Position::new(n).unwrap()
    }

    #[test]
    fn already_joined_reports_position_but_is_not_a_mutation() {
        let outcome = JoinOutcome::AlreadyJoined { position: pos(4) };
        assert_eq!(outcome.position(), Some(pos(4)));
        assert!(!outcome.is_joined());
    }

    #[test]
    fn full_has_no_position() {
        let outcome = JoinOutcome::Full { capacity: 18 };
        assert_eq!(outcome.position(), None);
        assert!(!outcome.is_joined());
    }

    #[test]
    fn leave_flags() {
        assert!(LeaveOutcome::Left { position: pos(2) }.is_left());
        assert!(!LeaveOutcome::NotAMember.is_left());
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            JoinOutcome::Joined { position: pos(3) }.to_string(),
            "You are signed up at position 3!"
        );
        assert_eq!(
            JoinOutcome::AlreadyJoined { position: pos(3) }.to_string(),
            "You are already signed up at position 3"
        );
        assert_eq!(
            JoinOutcome::Full { capacity: 18 }.to_string(),
            "The list is full!"
        );
        assert_eq!(LeaveOutcome::NotAMember.to_string(), "You are not on the list");
    }
}
