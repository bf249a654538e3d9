//! # Domain Entities
//!
//! - [`Event`]: one occurrence of a recurring sign-up, keyed by date
//! - [`Participant`]: a user's membership in an event's list
//! - [`UserProfile`]: display metadata of a user

pub mod event;
pub mod participant;

pub use event::Event;
pub use participant::{Participant, UserProfile};
