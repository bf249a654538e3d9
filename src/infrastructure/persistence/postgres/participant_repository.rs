//! # PostgreSQL Participant Repository
//!
//! PostgreSQL implementation of [`ParticipantRepository`] using sqlx.
//!
//! `remove_and_compact` runs the `DELETE` and the bulk renumbering
//! `UPDATE` in one transaction; other sessions see either the list before
//! the leave or the compacted list after it.
//!
//! Registries in separate processes share the tables but not their
//! in-process locks. Both `insert` and `remove_and_compact` therefore take
//! a transaction-scoped advisory lock keyed by the event id, and `insert`
//! only writes a position that is still the tail of the list. A join whose
//! count was read before another process changed the list fails with
//! `RepositoryError::Duplicate` instead of leaving a gap or exceeding
//! capacity.

use crate::domain::entities::{Participant, UserProfile};
use crate::domain::value_objects::{EventId, Position, Timestamp, UserId};
use crate::infrastructure::persistence::postgres::map_sqlx_error;
use crate::infrastructure::persistence::traits::{
    ParticipantRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

/// PostgreSQL implementation of [`ParticipantRepository`].
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// Creates a new PostgreSQL participant repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn key(event_id: EventId, user_id: UserId) -> String {
    format!("event {event_id} / user {user_id}")
}

fn position_to_sql(position: Position) -> RepositoryResult<i32> {
    i32::try_from(position.get()).map_err(|e| RepositoryError::serialization(e.to_string()))
}

/// Serializes list mutations of one event across sessions until the
/// transaction ends.
async fn lock_event(conn: &mut PgConnection, event_id: EventId) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(event_id.get())
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Participant>> {
        let row: Option<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT event_id, user_id, handle, given_name, family_name,
                   position, joined_at
            FROM participants
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id.get())
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error("Participant", key(event_id, user_id)))?;

        row.map(ParticipantRow::try_into_participant).transpose()
    }

    async fn count(&self, event_id: EventId) -> RepositoryResult<u32> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM participants WHERE event_id = $1")
                .bind(event_id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error("Participant", event_id.to_string()))?;

        u32::try_from(count).map_err(|e| RepositoryError::serialization(e.to_string()))
    }

    async fn insert(&self, participant: &Participant) -> RepositoryResult<()> {
        let event_id = participant.event_id();
        let profile = participant.profile();
        let position = position_to_sql(participant.position())?;
        let on_error = || map_sqlx_error("Participant", key(event_id, participant.user_id()));

        let mut tx = self.pool.begin().await.map_err(on_error())?;
        lock_event(&mut tx, event_id).await.map_err(on_error())?;

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM participants WHERE event_id = $1")
                .bind(event_id.get())
                .fetch_one(&mut *tx)
                .await
                .map_err(on_error())?;
        if count != i64::from(position) - 1 {
            // Dropping the transaction rolls it back and releases the lock.
            return Err(RepositoryError::duplicate(
                "Participant",
                format!("event {event_id} / position {position}"),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO participants (
                event_id, user_id, handle, given_name, family_name,
                position, joined_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event_id.get())
        .bind(participant.user_id().get())
        .bind(profile.handle())
        .bind(profile.given_name())
        .bind(profile.family_name())
        .bind(position)
        .bind(DateTime::<Utc>::from(participant.joined_at()))
        .execute(&mut *tx)
        .await
        .map_err(on_error())?;

        tx.commit().await.map_err(on_error())
    }

    async fn remove_and_compact(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Position>> {
        let on_error = || map_sqlx_error("Participant", key(event_id, user_id));

        let mut tx = self.pool.begin().await.map_err(on_error())?;
        lock_event(&mut tx, event_id).await.map_err(on_error())?;

        let removed: Option<(i32,)> = sqlx::query_as(
            r#"
            DELETE FROM participants
            WHERE event_id = $1 AND user_id = $2
            RETURNING position
            "#,
        )
        .bind(event_id.get())
        .bind(user_id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(on_error())?;

        let Some((vacated,)) = removed else {
            tx.rollback().await.map_err(on_error())?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE participants
            SET position = position - 1
            WHERE event_id = $1 AND position > $2
            "#,
        )
        .bind(event_id.get())
        .bind(vacated)
        .execute(&mut *tx)
        .await
        .map_err(on_error())?;

        tx.commit().await.map_err(on_error())?;

        Position::try_from(vacated)
            .map(Some)
            .map_err(|e| RepositoryError::serialization(e.to_string()))
    }

    async fn list(&self, event_id: EventId) -> RepositoryResult<Vec<Participant>> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT event_id, user_id, handle, given_name, family_name,
                   position, joined_at
            FROM participants
            WHERE event_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error("Participant", event_id.to_string()))?;

        rows.into_iter()
            .map(ParticipantRow::try_into_participant)
            .collect()
    }
}

/// Row type for participant queries.
#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    event_id: i64,
    user_id: i64,
    handle: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    position: i32,
    joined_at: DateTime<Utc>,
}

impl ParticipantRow {
    /// Converts the row into a Participant.
    fn try_into_participant(self) -> RepositoryResult<Participant> {
        let user_id =
            UserId::new(self.user_id).map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let position = Position::try_from(self.position)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        let mut profile = UserProfile::new(user_id);
        if let Some(handle) = self.handle {
            profile = profile.with_handle(handle);
        }
        if let Some(name) = self.given_name {
            profile = profile.with_given_name(name);
        }
        if let Some(name) = self.family_name {
            profile = profile.with_family_name(name);
        }

        Ok(Participant::new(
            EventId::new(self.event_id),
            profile,
            position,
            Timestamp::from(self.joined_at),
        ))
    }
}
