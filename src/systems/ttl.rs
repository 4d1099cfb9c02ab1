//! TTL (Time-to-live) system.
//!
//! Decrements every [`Ttl`](crate::components::ttl::Ttl) by the step's
//! delta and destroys entities whose time has run out.
//!
//! # Time Scaling
//!
//! The countdown uses [`WorldTime::delta`], which is already scaled by
//! `time_scale`, so slow motion stretches TTLs too.

use crate::ecs::entity::Entity;
use crate::ecs::registry::Registry;
use crate::resources::worldtime::WorldTime;

/// Returns the entities destroyed this step.
pub fn ttl_system(registry: &mut Registry, world_time: &WorldTime) -> Vec<Entity> {
    let dt = world_time.delta;
    let mut expired = Vec::new();
    for (entity, ttl) in registry.ttls.iter_mut() {
        ttl.remaining -= dt;
        if ttl.expired() {
            expired.push(entity);
        }
    }
    for &entity in &expired {
        registry.remove_all_components_of(entity);
    }
    expired
}
