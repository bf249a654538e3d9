//! # Application Services
//!
//! - [`ParticipantRegistry`]: the only component that mutates participant
//!   lists
//! - [`EventLocks`]: per-event or global mutual exclusion for mutations
//! - [`Roster`]: text rendering of an event's list
//! - [`ScheduleConfig`]: next event date and trigger time

pub mod event_locks;
pub mod participant_registry;
pub mod roster;
pub mod schedule;

pub use event_locks::{EventGuard, EventLocks, LockScope};
pub use participant_registry::{DEFAULT_CAPACITY, ParticipantRegistry, RegistryConfig};
pub use roster::Roster;
pub use schedule::{ScheduleConfig, ScheduleError};
