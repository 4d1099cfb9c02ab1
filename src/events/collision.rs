//! Collision events.
//!
//! The collision detector stores one [`CollisionEvent`] per participant of
//! every overlapping pair in the registry's event store: the event owned by
//! `a` names `b` and vice versa, with the same overlap. An entity touching
//! several others owns several events.
//!
//! Events describe a single step. Consumers read them after detection and
//! [`clear_collision_events`] empties the store before the next step, so
//! nothing keyed by these events should outlive the step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ecs::entity::Entity;
use crate::ecs::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// Penetration depth per axis. Never negative.
    pub overlap: Vec2,
    /// The other participant.
    pub other: Entity,
}

impl CollisionEvent {
    pub fn new(overlap: Vec2, other: Entity) -> Self {
        Self {
            overlap: overlap.max(Vec2::ZERO),
            other,
        }
    }
}

/// Drop every pending event. Runs last in each step.
pub fn clear_collision_events(registry: &mut Registry) {
    let pending = registry.collision_events.len();
    if pending > 0 {
        log::trace!("clearing {} collision events", pending);
    }
    registry.collision_events.clear();
}
