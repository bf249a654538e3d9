//! Property tests for `ParticipantRegistry`.
//!
//! Random sequences of joins and leaves are applied to the registry and to a
//! plain `Vec` model of the list. After every step the outcome must match the
//! model's prediction and the stored list must equal the model.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::sync::Arc;
use waitlist::application::services::{ParticipantRegistry, RegistryConfig};
use waitlist::domain::entities::UserProfile;
use waitlist::domain::outcomes::{JoinOutcome, LeaveOutcome};
use waitlist::domain::value_objects::{EventId, ExternalRef, Position, UserId};
use waitlist::infrastructure::persistence::in_memory::{
    InMemoryEventRepository, InMemoryParticipantRepository,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Join(i64),
    Leave(i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    // A small user pool makes duplicate joins and real leaves common.
    prop_oneof![
        3 => (1_i64..=12).prop_map(Op::Join),
        2 => (1_i64..=12).prop_map(Op::Leave),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..60)
}

fn position_of(model: &[i64], user: i64) -> Option<Position> {
    model
        .iter()
        .position(|&u| u == user)
        .and_then(|index| Position::new(u32::try_from(index + 1).ok()?))
}

async fn setup(capacity: u32) -> (ParticipantRegistry, EventId) {
    let events = InMemoryEventRepository::new();
    let participants = InMemoryParticipantRepository::new(events.clone());
    let registry = ParticipantRegistry::new(
        Arc::new(events),
        Arc::new(participants),
        RegistryConfig::with_capacity(capacity),
    )
    .unwrap();
    let event = registry
        .create_event("2024-01-07".parse().unwrap(), ExternalRef::new("prop"))
        .await
        .unwrap()
        .id();
    (registry, event)
}

/// Applies `ops`, checking every outcome against the model.
///
/// Returns a description of the first mismatch.
async fn run(capacity: u32, ops: &[Op]) -> Result<(), String> {
    let (registry, event) = setup(capacity).await;
    let mut model: Vec<i64> = Vec::new();

    for (step, op) in ops.iter().enumerate() {
        match *op {
            Op::Join(user) => {
                let expected = match position_of(&model, user) {
                    Some(position) => JoinOutcome::AlreadyJoined { position },
                    None if model.len() >= capacity as usize => JoinOutcome::Full { capacity },
                    None => {
                        model.push(user);
                        JoinOutcome::Joined {
                            position: position_of(&model, user).unwrap(),
                        }
                    }
                };
                let profile = UserProfile::new(UserId::new(user).unwrap());
                let actual = registry.join(event, &profile).await.unwrap();
                if actual != expected {
                    return Err(format!("step {step}: join {user}: {actual:?} != {expected:?}"));
                }
            }
            Op::Leave(user) => {
                let expected = match position_of(&model, user) {
                    Some(position) => {
                        model.retain(|&u| u != user);
                        LeaveOutcome::Left { position }
                    }
                    None => LeaveOutcome::NotAMember,
                };
                let actual = registry
                    .leave(event, UserId::new(user).unwrap())
                    .await
                    .unwrap();
                if actual != expected {
                    return Err(format!("step {step}: leave {user}: {actual:?} != {expected:?}"));
                }
            }
        }

        let stored: Vec<(i64, u32)> = registry
            .list_participants(event)
            .await
            .unwrap()
            .iter()
            .map(|p| (p.user_id().get(), p.position().get()))
            .collect();
        let modelled: Vec<(i64, u32)> = model.iter().copied().zip(1_u32..).collect();
        if stored != modelled {
            return Err(format!("step {step}: list {stored:?} != model {modelled:?}"));
        }
        if registry.count(event).await.unwrap() as usize != model.len() {
            return Err(format!("step {step}: count disagrees with list"));
        }
    }
    Ok(())
}

proptest! {
    /// Positions stay dense and ordered, and outcomes follow the model.
    #[test]
    fn prop_registry_matches_model(capacity in 1_u32..=8, ops in arb_ops()) {
        let result = tokio_test::block_on(run(capacity, &ops));
        prop_assert_eq!(result, Ok(()));
    }

    /// The list never exceeds capacity, however many distinct users join.
    #[test]
    fn prop_capacity_is_never_exceeded(capacity in 1_u32..=18, joiners in 0_i64..40) {
        let count = tokio_test::block_on(async {
            let (registry, event) = setup(capacity).await;
            for user in 1..=joiners {
                let profile = UserProfile::new(UserId::new(user).unwrap());
                registry.join(event, &profile).await.unwrap();
            }
            registry.count(event).await.unwrap()
        });
        let expected = u32::try_from(joiners).unwrap().min(capacity);
        prop_assert_eq!(count, expected);
    }
}
