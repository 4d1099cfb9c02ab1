//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! once per step, applying `time_scale` to the provided delta.

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the unscaled step in seconds. Writes the scaled value to both
/// `elapsed` and `delta` and bumps `frame_count`.
pub fn update_world_time(time: &mut WorldTime, dt: f32) {
    let scaled_dt = dt * time.time_scale;
    time.elapsed += scaled_dt;
    time.delta = scaled_dt;
    time.frame_count += 1;
}
