//! # Event Locks
//!
//! Exclusive sections that serialize registry mutations.
//!
//! A mutation holds an [`EventGuard`] from its first read until its storage
//! commit has returned. The guard is released when dropped, so every exit
//! path (success, storage fault, cancelled future) frees the section.
//!
//! A per-event section is removed from the table when its last guard is
//! dropped with nobody waiting. An entry left behind by a cancelled waiter
//! is removed by the next release for that event.
//!
//! # Examples
//!
//! ```
//! use waitlist::application::services::{EventLocks, LockScope};
//! use waitlist::domain::value_objects::EventId;
//!
//! # tokio_test::block_on(async {
//! let locks = EventLocks::new(LockScope::PerEvent);
//! let a = locks.acquire(EventId::new(1)).await;
//! // A different event is not blocked by `a`.
//! let b = locks.acquire(EventId::new(2)).await;
//! drop((a, b));
//! # });
//! ```

use crate::domain::value_objects::EventId;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Granularity of mutual exclusion between mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// One section shared by every event.
    Global,
    /// One section per event, created on first use.
    #[default]
    PerEvent,
}

impl fmt::Display for LockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::PerEvent => write!(f, "per_event"),
        }
    }
}

type SectionTable = DashMap<EventId, Arc<Mutex<()>>>;

/// Holds an exclusive section until dropped.
#[must_use = "the section is released as soon as the guard is dropped"]
pub struct EventGuard<'a> {
    event_id: EventId,
    guard: Option<OwnedMutexGuard<()>>,
    // Set for per-event sections.
    table: Option<&'a SectionTable>,
}

impl Drop for EventGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        if let Some(table) = self.table {
            // Waiters hold a clone of the mutex, so a count of one is the table's own.
            table.remove_if(&self.event_id, |_, mutex| Arc::strong_count(mutex) == 1);
        }
    }
}

impl fmt::Debug for EventGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventGuard")
            .field("event_id", &self.event_id)
            .finish()
    }
}

/// Table of exclusive sections keyed by event.
#[derive(Debug)]
pub struct EventLocks {
    scope: LockScope,
    global: Arc<Mutex<()>>,
    per_event: SectionTable,
}

impl EventLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new(scope: LockScope) -> Self {
        Self {
            scope,
            global: Arc::new(Mutex::new(())),
            per_event: DashMap::new(),
        }
    }

    /// Returns the configured scope.
    #[must_use]
    pub fn scope(&self) -> LockScope {
        self.scope
    }

    /// Waits for and enters the exclusive section covering `event_id`.
    ///
    /// Waiters are served in FIFO order.
    pub async fn acquire(&self, event_id: EventId) -> EventGuard<'_> {
        let (mutex, table) = match self.scope {
            LockScope::Global => (Arc::clone(&self.global), None),
            // The map entry is released before awaiting.
            LockScope::PerEvent => (
                Arc::clone(self.per_event.entry(event_id).or_default().value()),
                Some(&self.per_event),
            ),
        };

        EventGuard {
            event_id,
            guard: Some(mutex.lock_owned().await),
            table,
        }
    }

    /// Returns the number of events that currently have a section entry.
    #[must_use]
    pub fn tracked_events(&self) -> usize {
        self.per_event.len()
    }
}

impl Default for EventLocks {
    fn default() -> Self {
        Self::new(LockScope::default())
    }
}
