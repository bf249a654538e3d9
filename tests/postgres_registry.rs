//! Integration tests for the PostgreSQL repositories using testcontainers.
//!
//! # Requirements
//!
//! Docker must be running. The tests are ignored by default; run them with
//! `cargo test --test postgres_registry -- --ignored`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use futures::future::join_all;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use waitlist::application::error::{ApplicationError, InfrastructureError};
use waitlist::application::services::{ParticipantRegistry, RegistryConfig};
use waitlist::config::DatabaseConfig;
use waitlist::domain::entities::{Participant, UserProfile};
use waitlist::domain::outcomes::{JoinOutcome, LeaveOutcome};
use waitlist::domain::value_objects::{EventDate, ExternalRef, UserId};
use waitlist::infrastructure::persistence::postgres::{
    self, PostgresEventRepository, PostgresParticipantRepository,
};
use waitlist::infrastructure::persistence::{EventRepository, ParticipantRepository};

const CAPACITY: u32 = 18;

/// Starts a PostgreSQL container and returns it with a migrated pool.
///
/// The container must be kept alive for the duration of the test.
async fn setup() -> (ContainerAsync<GenericImage>, PgPool) {
    let container = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_USER", "postgres")
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "waitlist")
        .start()
        .await
        .expect("failed to start postgres container");

    let host = container.get_host().await.expect("container host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("container port");

    let config = DatabaseConfig {
        url: format!("postgres://postgres:postgres@{host}:{port}/waitlist"),
        max_connections: 10,
        acquire_timeout_secs: 5,
    };

    // The server restarts once after initdb; retry until it accepts connections.
    let mut attempts = 0;
    let pool = loop {
        match postgres::connect(&config).await {
            Ok(pool) => break pool,
            Err(e) if attempts < 30 => {
                attempts += 1;
                tracing::debug!(error = %e, attempts, "postgres not ready");
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Err(e) => panic!("postgres never became ready: {e}"),
        }
    };

    postgres::migrate(&pool).await.expect("migration failed");
    (container, pool)
}

fn registry(pool: &PgPool) -> Arc<ParticipantRegistry> {
    Arc::new(
        ParticipantRegistry::new(
            Arc::new(PostgresEventRepository::new(pool.clone())),
            Arc::new(PostgresParticipantRepository::new(pool.clone())),
            RegistryConfig::with_capacity(CAPACITY),
        )
        .unwrap(),
    )
}

fn date(s: &str) -> EventDate {
    s.parse().unwrap()
}

fn assert_dense(list: &[Participant]) {
    let positions: Vec<u32> = list.iter().map(|p| p.position().get()).collect();
    let expected: Vec<u32> = (1..=u32::try_from(list.len()).unwrap()).collect();
    assert_eq!(positions, expected, "positions are not dense");

    let users: HashSet<UserId> = list.iter().map(|p| p.user_id()).collect();
    assert_eq!(users.len(), list.len(), "duplicate user on the list");
    assert!(list.len() <= CAPACITY as usize, "capacity exceeded");
}

fn is_stale_join(error: &ApplicationError) -> bool {
    matches!(
        error,
        ApplicationError::Infrastructure(InfrastructureError::Repository(e)) if e.is_duplicate()
    )
}

fn profile(id: i64) -> UserProfile {
    UserProfile::new(UserId::new(id).unwrap())
        .with_handle(format!("user{id}"))
        .with_given_name("Test")
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn migrate_is_idempotent() {
    let (_container, pool) = setup().await;
    postgres::migrate(&pool).await.unwrap();
    postgres::migrate(&pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn recreating_event_keeps_id_and_participants() {
    let (_container, pool) = setup().await;
    let registry = registry(&pool);

    let first = registry
        .create_event(date("2024-01-07"), ExternalRef::from(1_i64))
        .await
        .unwrap();
    registry.join(first.id(), &profile(1)).await.unwrap();

    let second = registry
        .create_event(date("2024-01-07"), ExternalRef::from(2_i64))
        .await
        .unwrap();

    assert_eq!(second.id(), first.id());
    assert_eq!(second.external_ref().as_str(), "2");
    assert_eq!(registry.count(first.id()).await.unwrap(), 1);

    let events = PostgresEventRepository::new(pool.clone());
    let by_id = events.get(first.id()).await.unwrap().unwrap();
    assert_eq!(by_id.external_ref().as_str(), "2");
    assert!(events.get_by_date(date("2030-01-06")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn leave_renumbers_in_one_transaction() {
    let (_container, pool) = setup().await;
    let registry = registry(&pool);
    let event = registry
        .create_event(date("2024-01-07"), ExternalRef::new("m"))
        .await
        .unwrap()
        .id();
    for id in 1..=4 {
        registry.join(event, &profile(id)).await.unwrap();
    }

    let outcome = registry.leave(event, UserId::new(2).unwrap()).await.unwrap();
    assert!(outcome.is_left());

    let list: Vec<(i64, u32)> = registry
        .list_participants(event)
        .await
        .unwrap()
        .iter()
        .map(|p| (p.user_id().get(), p.position().get()))
        .collect();
    assert_eq!(list, vec![(1, 1), (3, 2), (4, 3)]);

    let again = registry.leave(event, UserId::new(2).unwrap()).await.unwrap();
    assert_eq!(again, LeaveOutcome::NotAMember);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn profile_round_trips_through_storage() {
    let (_container, pool) = setup().await;
    let registry = registry(&pool);
    let event = registry
        .create_event(date("2024-01-07"), ExternalRef::new("m"))
        .await
        .unwrap()
        .id();

    let ada = UserProfile::new(UserId::new(7).unwrap())
        .with_given_name("Ada")
        .with_family_name("Lovelace")
        .with_handle("ada");
    registry.join(event, &ada).await.unwrap();

    let participants = PostgresParticipantRepository::new(pool.clone());
    let stored = participants
        .find(event, ada.user_id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.profile(), &ada);
    assert_eq!(stored.profile().display_name(), "Ada Lovelace (@ada)");
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn insert_for_unknown_event_is_not_found() {
    use waitlist::domain::value_objects::{EventId, Position, Timestamp};

    let (_container, pool) = setup().await;
    let participants = PostgresParticipantRepository::new(pool);

    let orphan = Participant::new(
        EventId::new(999),
        profile(1),
        Position::FIRST,
        Timestamp::now(),
    );
    let err = participants.insert(&orphan).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a Docker daemon"]
async fn concurrent_joins_respect_capacity() {
    let (_container, pool) = setup().await;
    let registry = registry(&pool);
    let event = registry
        .create_event(date("2024-01-07"), ExternalRef::new("m"))
        .await
        .unwrap()
        .id();

    let tasks = (1..=i64::from(CAPACITY + 7)).map(|id| {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.join(event, &profile(id)).await.unwrap() })
    });
    let outcomes: Vec<JoinOutcome> = join_all(tasks)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        outcomes.iter().filter(|o| o.is_joined()).count(),
        CAPACITY as usize
    );
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, JoinOutcome::Full { .. }))
            .count(),
        7
    );

    let positions: Vec<u32> = registry
        .list_participants(event)
        .await
        .unwrap()
        .iter()
        .map(|p| p.position().get())
        .collect();
    assert_eq!(positions, (1..=CAPACITY).collect::<Vec<_>>());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn insert_behind_the_tail_is_rejected() {
    use waitlist::domain::value_objects::{Position, Timestamp};

    let (_container, pool) = setup().await;
    let registry = registry(&pool);
    let event = registry
        .create_event(date("2024-01-07"), ExternalRef::new("m"))
        .await
        .unwrap()
        .id();
    registry.join(event, &profile(1)).await.unwrap();

    // Position 3 was computed from a list that has since shrunk.
    let participants = PostgresParticipantRepository::new(pool);
    let stale = Participant::new(event, profile(2), Position::new(3).unwrap(), Timestamp::now());
    let err = participants.insert(&stale).await.unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(participants.count(event).await.unwrap(), 1);
}

/// Two registries stand in for two processes: they share the database but
/// not their in-process locks.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a Docker daemon"]
async fn separate_registries_never_leave_gaps() {
    let (_container, pool) = setup().await;
    let first = registry(&pool);
    let second = registry(&pool);
    let event = first
        .create_event(date("2024-01-07"), ExternalRef::new("m"))
        .await
        .unwrap()
        .id();
    for id in 1..=12 {
        first.join(event, &profile(id)).await.unwrap();
    }

    let leavers = (1..=12).map(|id| {
        let registry = Arc::clone(&first);
        tokio::spawn(async move {
            registry
                .leave(event, UserId::new(id).unwrap())
                .await
                .unwrap()
        })
    });
    let joiners = (100..=125).map(|id| {
        let registry = Arc::clone(&second);
        tokio::spawn(async move {
            match registry.join(event, &profile(id)).await {
                Ok(outcome) => Some(outcome),
                Err(e) if is_stale_join(&e) => None,
                Err(e) => panic!("join failed: {e}"),
            }
        })
    });
    let reader = {
        let registry = Arc::clone(&second);
        tokio::spawn(async move {
            for _ in 0..50 {
                assert_dense(&registry.list_participants(event).await.unwrap());
            }
        })
    };

    let (left, joined) = tokio::join!(join_all(leavers), join_all(joiners));
    reader.await.unwrap();

    assert!(left.into_iter().map(Result::unwrap).all(|o| o.is_left()));
    let joined = joined
        .into_iter()
        .map(Result::unwrap)
        .filter(|o| o.is_some_and(|o| o.is_joined()))
        .count();

    let list = first.list_participants(event).await.unwrap();
    assert_dense(&list);
    assert_eq!(list.len(), joined);
    assert!(list.iter().all(|p| p.user_id().get() >= 100));
}
