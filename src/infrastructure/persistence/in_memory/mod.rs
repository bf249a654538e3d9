//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryEventRepository`]: event store
//! - [`InMemoryParticipantRepository`]: participant rows, linked to an
//!   event repository for referential checks
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.
//! Each trait method holds a single guard for its whole duration, which is
//! what makes `remove_and_compact` atomic for readers.

pub mod event_repository;
pub mod participant_repository;

pub use event_repository::InMemoryEventRepository;
pub use participant_repository::InMemoryParticipantRepository;
