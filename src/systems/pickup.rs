//! Item collection.
//!
//! When the player's collision events name an `Item`-tagged entity holding a
//! [`Pickup`](crate::components::pickup::Pickup), the pickup's effect is
//! applied to the player and the item is destroyed. An item is consumed at
//! most once even if several events name it.

use crate::components::pickup::EffectTarget;
use crate::ecs::entity::{Entity, Tag};
use crate::ecs::registry::Registry;
use crate::resources::gameconfig::PlayerConfig;

/// Returns the items consumed this step.
pub fn pickup_system(
    registry: &mut Registry,
    player: Entity,
    player_config: &mut PlayerConfig,
) -> Vec<Entity> {
    let touched: Vec<Entity> = registry
        .collision_events
        .all_of(player)
        .map(|event| event.other)
        .filter(|other| other.is(Tag::Item))
        .collect();

    let mut consumed = Vec::new();
    for item in touched {
        let Some(pickup) = registry.pickups.try_get(item).copied() else {
            continue;
        };
        let applied = pickup.effect.apply(EffectTarget {
            health: registry.healths.try_get_mut(player),
            player: player_config,
        });
        log::debug!(
            "player picked up {:?} ({:?}, applied={})",
            item,
            pickup.effect,
            applied
        );
        registry.remove_all_components_of(item);
        consumed.push(item);
    }
    consumed
}
