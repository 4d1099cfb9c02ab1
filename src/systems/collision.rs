//! Collision detection.
//!
//! [`collision_detector`] tests every unordered pair of entities that have
//! both a [`Transform`](crate::components::transform::Transform) and a
//! [`Collider`](crate::components::collider::Collider). Each pair is tested
//! once, in storage order. For every overlapping pair it stores two
//! [`CollisionEvent`]s, one owned by each participant and naming the other,
//! both carrying the same per-axis penetration depth.
//!
//! The sweep is O(n²). Entity counts in a single stage are small enough
//! that a broad phase has not been worth it.

use crate::components::collider::Aabb;
use crate::ecs::entity::Entity;
use crate::ecs::registry::Registry;
use crate::events::collision::CollisionEvent;

/// Populate the registry's collision event store for this step.
///
/// Returns the number of overlapping pairs found.
pub fn collision_detector(registry: &mut Registry) -> usize {
    let bodies: Vec<(Entity, Aabb)> = registry
        .colliders
        .iter()
        .filter_map(|(entity, collider)| {
            registry
                .transforms
                .try_get(entity)
                .map(|transform| (entity, collider.aabb(transform)))
        })
        .collect();

    let mut pairs = 0;
    for (i, (entity_a, aabb_a)) in bodies.iter().enumerate() {
        for (entity_b, aabb_b) in &bodies[i + 1..] {
            if !aabb_a.overlaps(aabb_b) {
                continue;
            }
            let overlap = aabb_a.overlap(aabb_b);
            registry
                .collision_events
                .insert_duplicate(*entity_a, CollisionEvent::new(overlap, *entity_b));
            registry
                .collision_events
                .insert_duplicate(*entity_b, CollisionEvent::new(overlap, *entity_a));
            pairs += 1;
        }
    }

    if pairs > 0 {
        log::trace!("collision_detector: {} overlapping pairs", pairs);
    }
    pairs
}
