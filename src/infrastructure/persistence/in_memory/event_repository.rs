//! # In-Memory Event Repository
//!
//! In-memory implementation of [`EventRepository`] for testing.
//!
//! Identifiers are assigned from a counter starting at 1, mirroring a
//! database sequence.

use crate::domain::entities::Event;
use crate::domain::value_objects::{EventDate, EventId, ExternalRef, Timestamp};
use crate::infrastructure::persistence::traits::{EventRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct EventTable {
    rows: HashMap<EventId, Event>,
    by_date: HashMap<EventDate, EventId>,
    last_id: i64,
}

/// In-memory implementation of [`EventRepository`].
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    storage: Arc<RwLock<EventTable>>,
}

impl InMemoryEventRepository {
    /// Creates a new empty in-memory event repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of events in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.rows.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn upsert(&self, date: EventDate, external_ref: ExternalRef) -> RepositoryResult<Event> {
        let mut table = self.storage.write().await;

        let existing = table.by_date.get(&date).copied();
        if let Some(event) = existing.and_then(|id| table.rows.get_mut(&id)) {
            event.set_external_ref(external_ref);
            return Ok(event.clone());
        }

        table.last_id = table.last_id.saturating_add(1);
        let id = EventId::new(table.last_id);
        let event = Event::new(id, date, external_ref, Timestamp::now());
        table.by_date.insert(date, id);
        table.rows.insert(id, event.clone());
        Ok(event)
    }

    async fn get_by_date(&self, date: EventDate) -> RepositoryResult<Option<Event>> {
        let table = self.storage.read().await;
        Ok(table
            .by_date
            .get(&date)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn get(&self, id: EventId) -> RepositoryResult<Option<Event>> {
        let table = self.storage.read().await;
        Ok(table.rows.get(&id).cloned())
    }
}
