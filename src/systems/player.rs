//! Player kinematic controller.
//!
//! Runs after collision detection, once per step, in a fixed order:
//!
//! 1. Read input: horizontal walk velocity, jump press/hold.
//! 2. Resolve contacts against blockable geometry (see
//!    [`crate::systems::blocking`]) and look for ladders. A ladder is
//!    grabbed while touching one with up held, unless the player is still
//!    rising from a jump; once grabbed it is held until contact ends.
//! 3. On a ladder: no gravity, vertical speed comes from up/down input, and
//!    the player counts as grounded for jumping.
//! 4. Grounded: the jump ends, vertical speed is zeroed and coyote time is
//!    refilled.
//! 5. Airborne without having jumped: coyote time drains.
//! 6. A ceiling contact stops upward motion.
//! 7. Buffered presses age. A released press is dropped after the tap
//!    window, a held one after the hold window.
//! 8. A buffered press becomes a jump when grounded, on a ladder, or within
//!    coyote time, and there is no ceiling contact.
//! 9. Releasing jump while rising from a jump cuts upward speed.
//!
//! The y axis points down: a jump sets `velocity.y = -jump_speed`.

use crate::ecs::entity::Tag;
use crate::ecs::registry::Registry;
use crate::resources::gameconfig::{PhysicsConfig, PlayerConfig};
use crate::resources::input::InputState;
use crate::resources::player::PlayerState;
use crate::systems::blocking::{ContactSummary, resolve_entity};

pub fn player_controller(
    registry: &mut Registry,
    state: &mut PlayerState,
    input: &InputState,
    player: &PlayerConfig,
    physics: &PhysicsConfig,
    dt: f32,
) {
    let entity = state.entity;
    let Some(velocity_before) = registry.motions.try_get(entity).map(|m| m.velocity) else {
        return;
    };

    // 1. input
    if input.jump.just_pressed {
        state.pending_jump = true;
        state.jump_buffer_timer = 0.0;
    }
    state.jump_key_held = input.jump.active;

    // 2. contacts
    let contacts: ContactSummary = resolve_entity(registry, entity);
    let touching_ladder = registry
        .collision_events
        .all_of(entity)
        .any(|event| event.other.is(Tag::Ladder));
    let rising_from_jump = state.jumping && velocity_before.y < 0.0;

    let was_laddered = state.laddered;
    state.laddered = touching_ladder && (state.laddered || (input.up.active && !rising_from_jump));
    if state.laddered && contacts.grounded && !input.up.active {
        state.laddered = false;
    }
    if state.laddered && !was_laddered {
        log::debug!("player grabbed ladder");
    } else if !state.laddered && was_laddered {
        log::debug!("player left ladder");
    }
    state.grounded = contacts.grounded;
    state.ceiling = contacts.ceiling;

    let motion = registry.motions.get_mut(entity);
    motion.velocity.x = input.horizontal() * player.walk_speed;
    motion.update_facing();

    if state.laddered {
        // 3. ladder
        motion.acceleration.y = 0.0;
        motion.velocity.y = input.vertical() * player.climb_speed;
        state.jumping = false;
        state.coyote_timer = player.coyote_time;
    } else {
        motion.acceleration.y = physics.gravity;
        if state.grounded {
            // 4. grounded
            if state.jumping {
                log::debug!("player landed");
            }
            state.jumping = false;
            motion.velocity.y = 0.0;
            state.coyote_timer = player.coyote_time;
        } else if !state.jumping {
            // 5. coyote time
            let had_coyote = state.coyote_timer > 0.0;
            state.coyote_timer -= dt;
            if had_coyote && state.coyote_timer <= 0.0 {
                log::debug!("player coyote time expired");
            }
        }
    }

    // 6. ceiling
    if state.ceiling && motion.velocity.y < 0.0 {
        motion.velocity.y = 0.0;
    }

    // 7. jump buffer
    if state.pending_jump {
        state.jump_buffer_timer += dt;
        let tap_expired = !state.jump_key_held && state.jump_buffer_timer > player.jump_tap_window;
        let hold_expired = state.jump_buffer_timer > player.jump_hold_window;
        if tap_expired || hold_expired {
            state.pending_jump = false;
            log::debug!(
                "player dropped buffered jump after {:.3}s",
                state.jump_buffer_timer
            );
        }
    }

    // 8. jump
    let supported = state.grounded || state.laddered;
    let coyote = state.coyote_timer > 0.0 && !state.jumping;
    if state.pending_jump && !state.ceiling && (supported || coyote) {
        log::debug!(
            "player jumped ({})",
            if supported { "supported" } else { "coyote" }
        );
        state.pending_jump = false;
        state.jumping = true;
        state.laddered = false;
        state.grounded = false;
        state.coyote_timer = 0.0;
        motion.acceleration.y = physics.gravity;
        motion.velocity.y = -player.jump_speed;
    } else if input.jump.just_released
        && state.jumping
        && !state.pending_jump
        && motion.velocity.y < 0.0
    {
        // 9. variable jump height
        motion.velocity.y *= player.jump_cut_factor;
    }
}
