use serde::{Deserialize, Serialize};

/// Reverse horizontal velocity when pushed sideways out of solid geometry.
///
/// `damping` scales the reflected speed: `1.0` is a perfect bounce, `0.0`
/// stops dead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    pub damping: f32,
}

impl Bounce {
    pub fn new(damping: f32) -> Self {
        Self { damping }
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self { damping: 0.5 }
    }
}
