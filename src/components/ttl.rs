//! Time-to-live component for automatic entity removal.
//!
//! The [`Ttl`] component counts down each step. When the remaining time
//! reaches zero the entity is removed from every store by
//! [`crate::systems::ttl::ttl_system`]. Thrown projectiles use it so a
//! missed shot does not live forever.

/// Time-to-live in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ttl {
    /// Remaining time in seconds before removal.
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }

    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }
}
