//! Contact damage.
//!
//! An entity with [`Damage`](crate::components::health::Damage) hurts every
//! [`Health`](crate::components::health::Health) carrier it overlaps this
//! step, except entities of its own tag and, for projectiles, the player who
//! threw them. A hit grants [`HIT_INVULNERABILITY`] seconds during which the
//! victim ignores further hits. Projectiles are destroyed on their first hit;
//! victims whose health drops to zero are destroyed.

use crate::ecs::entity::{Entity, Tag};
use crate::ecs::registry::Registry;
use crate::resources::worldtime::WorldTime;

pub const HIT_INVULNERABILITY: f32 = 0.5;

fn hurts(attacker: Tag, victim: Tag) -> bool {
    attacker != victim && !(attacker == Tag::Projectile && victim == Tag::Player)
}

/// Returns the entities destroyed this step.
pub fn damage_system(registry: &mut Registry, world_time: &WorldTime) -> Vec<Entity> {
    for (_, health) in registry.healths.iter_mut() {
        health.invulnerable -= world_time.delta;
    }

    let hits: Vec<(Entity, Entity, i32)> = registry
        .collision_events
        .iter()
        .filter_map(|(attacker, event)| {
            let damage = registry.damages.try_get(attacker)?;
            let victim = event.other;
            (registry.healths.has(victim) && hurts(attacker.tag(), victim.tag()))
                .then_some((attacker, victim, damage.amount))
        })
        .collect();

    let mut destroyed = Vec::new();
    for (attacker, victim, amount) in hits {
        if destroyed.contains(&attacker) || destroyed.contains(&victim) {
            continue;
        }
        let Some(health) = registry.healths.try_get_mut(victim) else {
            continue;
        };
        if health.invulnerable > 0.0 {
            continue;
        }
        health.damage(amount);
        health.invulnerable = HIT_INVULNERABILITY;
        let dead = health.is_dead();
        log::debug!("{:?} hit {:?} for {} (dead={})", attacker, victim, amount, dead);

        if attacker.is(Tag::Projectile) {
            destroyed.push(attacker);
        }
        if dead {
            destroyed.push(victim);
        }
    }

    for &entity in &destroyed {
        registry.remove_all_components_of(entity);
    }
    destroyed
}
