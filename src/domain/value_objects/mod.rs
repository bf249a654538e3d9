//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`EventId`]: storage-assigned event identifier
//! - [`UserId`]: nonzero user identifier from the messaging platform
//! - [`ExternalRef`]: opaque handle of the message carrying an event's list
//!
//! ## Ordering and Time
//!
//! - [`EventDate`]: ISO calendar date keying an event
//! - [`Position`]: 1-based rank inside an event's list
//! - [`Timestamp`]: UTC instant

pub mod event_date;
pub mod ids;
pub mod position;
pub mod timestamp;

pub use event_date::EventDate;
pub use ids::{EventId, ExternalRef, UserId};
pub use position::Position;
pub use timestamp::Timestamp;
