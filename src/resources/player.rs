//! Player kinematic state.
//!
//! There is one player, so its jump/ladder bookkeeping lives here rather
//! than in a per-entity store. [`player_controller`] mutates it once per
//! step.
//!
//! [`player_controller`]: crate::systems::player::player_controller

use serde::Serialize;

use crate::ecs::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerMode {
    Grounded,
    Airborne,
    Laddered,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerState {
    /// The controlled entity, or [`Entity::NONE`] when no player is spawned.
    pub entity: Entity,
    /// A jump press is buffered and waiting to be consumed.
    pub pending_jump: bool,
    /// Ascending (or falling) from a jump the player started.
    pub jumping: bool,
    pub jump_key_held: bool,
    /// Seconds since the buffered press.
    pub jump_buffer_timer: f32,
    /// Seconds of ledge grace left. Goes negative once expired.
    pub coyote_timer: f32,
    pub laddered: bool,
    /// Ground contact found this step.
    pub grounded: bool,
    /// Ceiling contact found this step.
    pub ceiling: bool,
}

impl PlayerState {
    /// Fresh state for a player spawned standing on the ground.
    pub fn new(entity: Entity, coyote_time: f32) -> Self {
        Self {
            entity,
            pending_jump: false,
            jumping: false,
            jump_key_held: false,
            jump_buffer_timer: 0.0,
            coyote_timer: coyote_time,
            laddered: false,
            grounded: true,
            ceiling: false,
        }
    }

    pub fn detached() -> Self {
        Self::new(Entity::NONE, 0.0)
    }

    pub fn mode(&self) -> PlayerMode {
        if self.laddered {
            PlayerMode::Laddered
        } else if self.grounded {
            PlayerMode::Grounded
        } else {
            PlayerMode::Airborne
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::detached()
    }
}
