//! Kinematic state consumed by the movement integrator.
//!
//! [`Motion`] stores velocity, a constant acceleration, and a per-axis
//! terminal velocity. The movement system applies
//! `velocity += acceleration * dt`, clamps each axis to
//! `[-terminal_velocity, terminal_velocity]`, and then moves the entity's
//! [`Transform`](super::transform::Transform) by `velocity * dt`.
//!
//! The y axis points down: gravity is a positive `acceleration.y` and a
//! jump is a negative `velocity.y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// World units per second.
    pub velocity: Vec2,
    /// World units per second squared.
    pub acceleration: Vec2,
    /// Per-axis speed limit. Always non-negative.
    pub terminal_velocity: Vec2,
    pub facing_right: bool,
}

impl Default for Motion {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion {
    /// No velocity, no acceleration, unbounded speed.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            terminal_velocity: Vec2::splat(f32::INFINITY),
            facing_right: true,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Negative components are taken by magnitude.
    pub fn with_terminal_velocity(mut self, terminal: Vec2) -> Self {
        self.terminal_velocity = terminal.abs();
        self
    }

    /// Clamp each velocity axis to the terminal velocity.
    pub fn clamp_to_terminal(&mut self) {
        let limit = self.terminal_velocity.abs();
        self.velocity = self.velocity.clamp(-limit, limit);
    }

    /// Integrate one step of `dt` seconds and return the position delta.
    pub fn integrate(&mut self, dt: f32) -> Vec2 {
        self.velocity += self.acceleration * dt;
        self.clamp_to_terminal();
        self.velocity * dt
    }

    /// Update `facing_right` from horizontal velocity. Zero keeps the last facing.
    pub fn update_facing(&mut self) {
        if self.velocity.x > 0.0 {
            self.facing_right = true;
        } else if self.velocity.x < 0.0 {
            self.facing_right = false;
        }
    }
}
