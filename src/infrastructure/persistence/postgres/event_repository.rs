//! # PostgreSQL Event Repository
//!
//! PostgreSQL implementation of [`EventRepository`] using sqlx.
//!
//! Creation is a single `INSERT … ON CONFLICT (event_date) DO UPDATE`,
//! so re-creating an event for a known date keeps its `id` and therefore
//! its participants.

use crate::domain::entities::Event;
use crate::domain::value_objects::{EventDate, EventId, ExternalRef, Timestamp};
use crate::infrastructure::persistence::postgres::map_sqlx_error;
use crate::infrastructure::persistence::traits::{EventRepository, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of [`EventRepository`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use waitlist::infrastructure::persistence::postgres::PostgresEventRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let events = PostgresEventRepository::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a new PostgreSQL event repository.
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

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn upsert(&self, date: EventDate, external_ref: ExternalRef) -> RepositoryResult<Event> {
        let row: EventRow = sqlx::query_as(
            r#"
            INSERT INTO events (event_date, external_ref)
            VALUES ($1, $2)
            ON CONFLICT (event_date)
                DO UPDATE SET external_ref = EXCLUDED.external_ref
            RETURNING id, event_date, external_ref, created_at
            "#,
        )
        .bind(date.as_naive())
        .bind(external_ref.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error("Event", date.to_string()))?;

        Ok(row.into_event())
    }

    async fn get_by_date(&self, date: EventDate) -> RepositoryResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT id, event_date, external_ref, created_at
            FROM events
            WHERE event_date = $1
            "#,
        )
        .bind(date.as_naive())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error("Event", date.to_string()))?;

        Ok(row.map(EventRow::into_event))
    }

    async fn get(&self, id: EventId) -> RepositoryResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT id, event_date, external_ref, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error("Event", id.to_string()))?;

        Ok(row.map(EventRow::into_event))
    }
}

/// Row type for event queries.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    event_date: NaiveDate,
    external_ref: String,
    created_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self) -> Event {
        Event::new(
            EventId::new(self.id),
            EventDate::new(self.event_date),
            ExternalRef::new(self.external_ref),
            Timestamp::from(self.created_at),
        )
    }
}
