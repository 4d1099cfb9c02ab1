//! Movement integrator.
//!
//! Runs first in every step, before collision detection. For each entity
//! with both a [`Motion`] and a [`Transform`], velocity is advanced by
//! acceleration, clamped per axis to the terminal velocity, and the position
//! moved by the result.

use crate::components::motion::Motion;
use crate::components::transform::Transform;
use crate::ecs::registry::Registry;
use crate::resources::worldtime::WorldTime;

pub fn movement(registry: &mut Registry, time: &WorldTime) {
    let dt = time.delta;
    let Registry {
        motions,
        transforms,
        ..
    } = registry;
    for (entity, motion) in motions.iter_mut() {
        let Some(transform) = transforms.try_get_mut(entity) else {
            continue;
        };
        integrate(motion, transform, dt);
    }
}

fn integrate(motion: &mut Motion, transform: &mut Transform, dt: f32) {
    let delta = motion.integrate(dt);
    transform.translate(delta);
}
