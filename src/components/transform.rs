use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World placement of an entity.
///
/// `center` is the pivot measured from the top-left corner, in unscaled
/// units. Colliders are laid out around it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub center: Vec2,
    /// Degrees. Not used by collision.
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            center: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
