//! # Application Layer
//!
//! Services that coordinate the domain with the repository ports.
//!
//! - [`services::ParticipantRegistry`]: join, leave, list, count
//! - [`services::EventLocks`]: exclusive sections serializing mutations
//! - [`services::Roster`]: rendered list snapshot
//! - [`services::ScheduleConfig`]: weekly cadence of new events

pub mod error;
pub mod services;
