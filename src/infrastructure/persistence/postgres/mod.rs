//! # PostgreSQL Repositories
//!
//! PostgreSQL implementations of the repository ports using sqlx.
//!
//! - [`PostgresEventRepository`]: `events` table
//! - [`PostgresParticipantRepository`]: `participants` table
//! - [`migrate`]: creates both tables
//!
//! # Examples
//!
//! ```ignore
//! use waitlist::config::DatabaseConfig;
//! use waitlist::infrastructure::persistence::postgres;
//!
//! let pool = postgres::connect(&DatabaseConfig::default()).await?;
//! postgres::migrate(&pool).await?;
//! let events = postgres::PostgresEventRepository::new(pool.clone());
//! let participants = postgres::PostgresParticipantRepository::new(pool);
//! ```

pub mod event_repository;
pub mod participant_repository;
pub mod schema;

pub use event_repository::PostgresEventRepository;
pub use participant_repository::PostgresParticipantRepository;
pub use schema::migrate;

use crate::config::DatabaseConfig;
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Opens a connection pool for the configured database.
///
/// # Errors
///
/// Returns `RepositoryError::Connection` if the database cannot be reached.
pub async fn connect(config: &DatabaseConfig) -> RepositoryResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| RepositoryError::connection(e.to_string()))
}

/// Maps a sqlx error to the repository error taxonomy.
///
/// Constraint violations keep their meaning (`Duplicate`, `NotFound`) so
/// callers can tell an unexpected conflict from an unreachable database.
pub(crate) fn map_sqlx_error(
    entity_type: &'static str,
    id: impl Into<String>,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    let id = id.into();
    move |error| match error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::duplicate(entity_type, id)
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepositoryError::not_found("Event", id)
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::connection(error.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::serialization(error.to_string())
        }
        other => RepositoryError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_connection_errors() {
        let err = map_sqlx_error("Event", "1")(sqlx::Error::PoolTimedOut);
        assert!(err.is_connection());
    }

    #[test]
    fn row_not_found_is_a_query_error() {
        let err = map_sqlx_error("Event", "1")(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
