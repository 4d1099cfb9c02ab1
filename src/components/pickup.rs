//! Collectable items.
//!
//! A [`Pickup`] carries one [`Effect`]. When the player touches an
//! `Item`-tagged entity holding a pickup, the pickup system calls
//! [`Effect::apply`] on the player's state and removes the item.
//!
//! Effects are plain data so items can be built from level files and
//! inspected in tests; adding a kind means adding a variant and a match arm.

use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::resources::gameconfig::PlayerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Restore health, capped at max.
    Heal(i32),
    /// Raise max health and fill the new capacity.
    MaxHealth(i32),
    /// Multiply jump speed.
    JumpBoost(f32),
    /// Multiply walk speed.
    SpeedBoost(f32),
}

/// What an effect can change.
pub struct EffectTarget<'a> {
    pub health: Option<&'a mut Health>,
    pub player: &'a mut PlayerConfig,
}

impl Effect {
    /// Apply to `target`. Returns `false` when the effect had nothing to act
    /// on (a health effect on an entity without [`Health`]).
    pub fn apply(&self, target: EffectTarget<'_>) -> bool {
        match *self {
            Effect::Heal(amount) => match target.health {
                Some(health) => {
                    health.heal(amount);
                    true
                }
                None => false,
            },
            Effect::MaxHealth(amount) => match target.health {
                Some(health) => {
                    health.max += amount;
                    health.current += amount;
                    true
                }
                None => false,
            },
            Effect::JumpBoost(factor) => {
                target.player.jump_speed *= factor;
                true
            }
            Effect::SpeedBoost(factor) => {
                target.player.walk_speed *= factor;
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub effect: Effect,
}

impl Pickup {
    pub fn new(effect: Effect) -> Self {
        Self { effect }
    }
}
