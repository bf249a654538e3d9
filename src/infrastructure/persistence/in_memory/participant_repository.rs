//! # In-Memory Participant Repository
//!
//! In-memory implementation of [`ParticipantRepository`] for testing.
//!
//! Each event's participants are kept in a `Vec` sorted by position, so
//! listing is a clone and renumbering is a single pass under one write
//! guard.

use crate::domain::entities::Participant;
use crate::domain::value_objects::{EventId, Position, UserId};
use crate::infrastructure::persistence::in_memory::InMemoryEventRepository;
use crate::infrastructure::persistence::traits::{
    EventRepository, ParticipantRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ParticipantRepository`].
///
/// Inserts are checked against the linked [`InMemoryEventRepository`] the
/// way a foreign key would be.
#[derive(Debug, Clone)]
pub struct InMemoryParticipantRepository {
    events: InMemoryEventRepository,
    storage: Arc<RwLock<HashMap<EventId, Vec<Participant>>>>,
}

impl InMemoryParticipantRepository {
    /// Creates a new empty repository linked to an event repository.
    #[must_use]
    pub fn new(events: InMemoryEventRepository) -> Self {
        Self {
            events,
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the total number of participants across all events.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Clears all participants from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Participant>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(&event_id)
            .and_then(|rows| rows.iter().find(|p| p.user_id() == user_id))
            .cloned())
    }

    async fn count(&self, event_id: EventId) -> RepositoryResult<u32> {
        let storage = self.storage.read().await;
        let len = storage.get(&event_id).map_or(0, Vec::len);
        u32::try_from(len).map_err(|e| RepositoryError::internal(e.to_string()))
    }

    async fn insert(&self, participant: &Participant) -> RepositoryResult<()> {
        let event_id = participant.event_id();
        if self.events.get(event_id).await?.is_none() {
            return Err(RepositoryError::not_found("Event", event_id.to_string()));
        }

        let mut storage = self.storage.write().await;
        let rows = storage.entry(event_id).or_default();

        if rows.iter().any(|p| p.user_id() == participant.user_id()) {
            return Err(RepositoryError::duplicate(
                "Participant",
                format!("event {event_id} / user {}", participant.user_id()),
            ));
        }

        match rows.binary_search_by_key(&participant.position(), Participant::position) {
            Ok(_) => Err(RepositoryError::duplicate(
                "Participant",
                format!("event {event_id} / position {}", participant.position()),
            )),
            Err(index) => {
                rows.insert(index, participant.clone());
                Ok(())
            }
        }
    }

    async fn remove_and_compact(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Position>> {
        let mut storage = self.storage.write().await;
        let Some(rows) = storage.get_mut(&event_id) else {
            return Ok(None);
        };
        let Some(index) = rows.iter().position(|p| p.user_id() == user_id) else {
            return Ok(None);
        };

        let removed = rows.remove(index);
        let vacated = removed.position();
        for participant in rows.iter_mut().filter(|p| p.position() > vacated) {
            participant.move_up();
        }

        Ok(Some(vacated))
    }

    async fn list(&self, event_id: EventId) -> RepositoryResult<Vec<Participant>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&event_id).cloned().unwrap_or_default())
    }
}
