//! # Participant Registry
//!
//! The only component allowed to mutate participant lists.
//!
//! [`ParticipantRegistry`] turns join and leave requests into typed
//! outcomes while keeping every event's list:
//!
//! - free of duplicate users,
//! - within the configured capacity,
//! - densely numbered `1..=N`.
//!
//! # Concurrency
//!
//! `join` and `leave` run their check-then-act sequence inside the
//! [`EventLocks`] section for the event, held until the storage call has
//! returned. Two mutations of the same event therefore never interleave,
//! so the count read by a join is still the count when its insert commits.
//! Reads (`list_participants`, `count`) take no section; each is a single
//! storage read and sees committed state only.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use waitlist::application::services::{ParticipantRegistry, RegistryConfig};
//! use waitlist::domain::entities::UserProfile;
//! use waitlist::domain::outcomes::{JoinOutcome, LeaveOutcome};
//! use waitlist::domain::value_objects::{ExternalRef, UserId};
//! use waitlist::infrastructure::persistence::in_memory::{
//!     InMemoryEventRepository, InMemoryParticipantRepository,
//! };
//!
//! # tokio_test::block_on(async {
//! let events = InMemoryEventRepository::new();
//! let participants = InMemoryParticipantRepository::new(events.clone());
//! let registry = ParticipantRegistry::new(
//!     Arc::new(events),
//!     Arc::new(participants),
//!     RegistryConfig::with_capacity(1),
//! )
//! .unwrap();
//!
//! let event = registry
//!     .create_event("2024-01-07".parse().unwrap(), ExternalRef::from(1_i64))
//!     .await
//!     .unwrap();
//!
//! let alice = UserProfile::new(UserId::new(1).unwrap());
//! let bob = UserProfile::new(UserId::new(2).unwrap());
//!
//! assert!(registry.join(event.id(), &alice).await.unwrap().is_joined());
//! assert_eq!(
//!     registry.join(event.id(), &bob).await.unwrap(),
//!     JoinOutcome::Full { capacity: 1 }
//! );
//! assert!(registry.leave(event.id(), alice.user_id()).await.unwrap().is_left());
//! assert_eq!(
//!     registry.leave(event.id(), alice.user_id()).await.unwrap(),
//!     LeaveOutcome::NotAMember
//! );
//! # });
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::event_locks::{EventLocks, LockScope};
use crate::application::services::roster::Roster;
use crate::domain::entities::{Event, Participant, UserProfile};
use crate::domain::errors::DomainError;
use crate::domain::outcomes::{JoinOutcome, LeaveOutcome};
use crate::domain::value_objects::{EventDate, EventId, ExternalRef, Position, Timestamp, UserId};
use crate::infrastructure::persistence::traits::{EventRepository, ParticipantRepository};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default maximum number of participants per event.
pub const DEFAULT_CAPACITY: u32 = 18;

/// Configuration of the participant registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum simultaneous participants per event.
    pub capacity: u32,
    /// Granularity of mutual exclusion between mutations.
    pub lock_scope: LockScope,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            lock_scope: LockScope::default(),
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets the lock scope.
    #[must_use]
    pub fn with_lock_scope(mut self, lock_scope: LockScope) -> Self {
        self.lock_scope = lock_scope;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if the capacity is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.capacity == 0 {
            return Err(DomainError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Registry of participants per event.
pub struct ParticipantRegistry {
    events: Arc<dyn EventRepository>,
    participants: Arc<dyn ParticipantRepository>,
    locks: EventLocks,
    config: RegistryConfig,
}

impl fmt::Debug for ParticipantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantRegistry")
            .field("events", &self.events)
            .field("participants", &self.participants)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ParticipantRegistry {
    /// Creates a registry over the given repositories.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the configuration is invalid.
    pub fn new(
        events: Arc<dyn EventRepository>,
        participants: Arc<dyn ParticipantRepository>,
        config: RegistryConfig,
    ) -> ApplicationResult<Self> {
        config.validate()?;
        Ok(Self {
            events,
            participants,
            locks: EventLocks::new(config.lock_scope),
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the configured capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.config.capacity
    }

    /// Creates the event for `date`, or repoints the external reference of
    /// the existing one. Participants of an existing event are kept.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults.
    #[instrument(skip_all, fields(date = %date, external_ref = %external_ref))]
    pub async fn create_event(
        &self,
        date: EventDate,
        external_ref: ExternalRef,
    ) -> ApplicationResult<Event> {
        let event = self.events.upsert(date, external_ref).await?;
        info!(event_id = %event.id(), "event created");
        Ok(event)
    }

    /// Resolves a date to its event.
    ///
    /// Returns `None` if no event exists for the date.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults.
    pub async fn event_by_date(&self, date: EventDate) -> ApplicationResult<Option<Event>> {
        Ok(self.events.get_by_date(date).await?)
    }

    /// Resolves a date to its event, treating absence as an error.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::EventNotFound` if no event exists for the date
    /// - `ApplicationError::Infrastructure` on storage faults
    pub async fn require_event(&self, date: EventDate) -> ApplicationResult<Event> {
        self.event_by_date(date)
            .await?
            .ok_or_else(|| ApplicationError::event_not_found(date))
    }

    /// Adds a user to the end of an event's list.
    ///
    /// Returns `AlreadyJoined` with the current position if the user is on
    /// the list, `Full` if the list is at capacity, and `Joined` with
    /// position `N + 1` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults; the
    /// list is left unchanged.
    #[instrument(skip_all, fields(event_id = %event_id, user_id = %profile.user_id()))]
    pub async fn join(
        &self,
        event_id: EventId,
        profile: &UserProfile,
    ) -> ApplicationResult<JoinOutcome> {
        let _section = self.locks.acquire(event_id).await;
        debug!("section acquired");

        if let Some(existing) = self.participants.find(event_id, profile.user_id()).await? {
            let position = existing.position();
            info!(%position, "already joined");
            return Ok(JoinOutcome::AlreadyJoined { position });
        }

        let count = self.participants.count(event_id).await?;
        if count >= self.config.capacity {
            info!(count, capacity = self.config.capacity, "list full");
            return Ok(JoinOutcome::Full {
                capacity: self.config.capacity,
            });
        }

        let position = Position::after(count);
        let participant = Participant::new(event_id, profile.clone(), position, Timestamp::now());
        self.participants
            .insert(&participant)
            .await
            .inspect_err(|e| warn!(error = %e, "insert failed"))?;

        info!(%position, "joined");
        Ok(JoinOutcome::Joined { position })
    }

    /// Removes a user from an event's list; later participants move up.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults; the
    /// list is left unchanged.
    #[instrument(skip_all, fields(event_id = %event_id, user_id = %user_id))]
    pub async fn leave(&self, event_id: EventId, user_id: UserId) -> ApplicationResult<LeaveOutcome> {
        let _section = self.locks.acquire(event_id).await;
        debug!("section acquired");

        let vacated = self
            .participants
            .remove_and_compact(event_id, user_id)
            .await
            .inspect_err(|e| warn!(error = %e, "remove failed"))?;

        match vacated {
            Some(position) => {
                info!(%position, "left");
                Ok(LeaveOutcome::Left { position })
            }
            None => {
                info!("not a member");
                Ok(LeaveOutcome::NotAMember)
            }
        }
    }

    /// Lists an event's participants ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults.
    pub async fn list_participants(&self, event_id: EventId) -> ApplicationResult<Vec<Participant>> {
        Ok(self.participants.list(event_id).await?)
    }

    /// Counts an event's participants.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults.
    pub async fn count(&self, event_id: EventId) -> ApplicationResult<u32> {
        Ok(self.participants.count(event_id).await?)
    }

    /// Builds a renderable snapshot of an event's list.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` on storage faults.
    pub async fn roster(&self, event: &Event) -> ApplicationResult<Roster> {
        let participants = self.list_participants(event.id()).await?;
        Ok(Roster::new(event.date(), self.config.capacity, participants))
    }
}
