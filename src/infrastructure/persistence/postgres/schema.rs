//! # Schema
//!
//! DDL for the `events` and `participants` tables.
//!
//! `(event_id, position)` is unique but deferred to commit time: the
//! renumbering `UPDATE` on leave shifts positions down one row at a time,
//! and only the committed result has to be collision-free.

use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use tracing::debug;

const STATEMENTS: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id BIGSERIAL PRIMARY KEY,
        event_date DATE NOT NULL UNIQUE,
        external_ref TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS participants (
        id BIGSERIAL PRIMARY KEY,
        event_id BIGINT NOT NULL REFERENCES events (id),
        user_id BIGINT NOT NULL CHECK (user_id <> 0),
        handle TEXT,
        given_name TEXT,
        family_name TEXT,
        position INTEGER NOT NULL CHECK (position > 0),
        joined_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT participants_event_user_key UNIQUE (event_id, user_id),
        CONSTRAINT participants_event_position_key UNIQUE (event_id, position)
            DEFERRABLE INITIALLY DEFERRED
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_participants_event ON participants (event_id, position)",
];

/// Creates the tables if they do not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Query` if a statement fails.
pub async fn migrate(pool: &PgPool) -> RepositoryResult<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
    }
    debug!(statements = STATEMENTS.len(), "schema migrated");
    Ok(())
}
