//! # Waitlist
//!
//! Capacity-bounded, strictly ordered sign-up lists for recurring events.
//!
//! Users join an ordered waitlist for an event, may later withdraw, and the
//! list is rendered on demand. The [`ParticipantRegistry`] accepts concurrent
//! join/leave requests and guarantees:
//!
//! - no duplicate membership per event,
//! - no position collisions and no capacity overrun,
//! - dense positions `1..=N` after every mutation.
//!
//! # Architecture
//!
//! ```text
//! domain          ids, dates, positions, Event, Participant, outcomes
//!   ^
//! application     ParticipantRegistry, EventLocks, Roster, ScheduleConfig
//!   ^
//! infrastructure  EventRepository / ParticipantRepository ports,
//!                 in-memory and PostgreSQL adapters, logging
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use waitlist::application::services::{ParticipantRegistry, RegistryConfig};
//! use waitlist::domain::entities::UserProfile;
//! use waitlist::domain::outcomes::JoinOutcome;
//! use waitlist::domain::value_objects::{EventDate, ExternalRef, UserId};
//! use waitlist::infrastructure::persistence::in_memory::{
//!     InMemoryEventRepository, InMemoryParticipantRepository,
//! };
//!
//! # tokio_test::block_on(async {
//! let events = InMemoryEventRepository::new();
//! let participants = InMemoryParticipantRepository::new(events.clone());
//! let registry = ParticipantRegistry::new(
//!     Arc::new(events),
//!     Arc::new(participants),
//!     RegistryConfig::with_capacity(18),
//! )
//! .unwrap();
//!
//! let date: EventDate = "2024-01-07".parse().unwrap();
//! let event = registry.create_event(date, ExternalRef::new("msg-1")).await.unwrap();
//!
//! let profile = UserProfile::new(UserId::new(42).unwrap()).with_handle("alice");
//! let outcome = registry.join(event.id(), &profile).await.unwrap();
//! assert!(matches!(outcome, JoinOutcome::Joined { .. }));
//! # });
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::application::services::{ParticipantRegistry, RegistryConfig};
pub use crate::config::AppConfig;
