//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`EventRepository`]: the event store
//! - [`ParticipantRepository`]: participant rows per event
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for tests and single-process use
//! - `postgres`: PostgreSQL implementations with schema migration

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{EventRepository, ParticipantRepository, RepositoryError, RepositoryResult};
