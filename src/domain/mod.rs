//! # Domain Layer
//!
//! Core types of the waitlist: identifiers, dates, positions, the
//! [`Event`](entities::Event) and [`Participant`](entities::Participant)
//! entities, and the typed outcomes of registry operations.
//!
//! The domain layer has no knowledge of storage or concurrency.

pub mod entities;
pub mod errors;
pub mod outcomes;
pub mod value_objects;
