//! # Infrastructure Layer
//!
//! Adapters for the ports defined by the application layer.
//!
//! - [`persistence`]: repository traits with in-memory and PostgreSQL implementations
//! - [`logging`]: tracing subscriber setup

pub mod logging;
pub mod persistence;
