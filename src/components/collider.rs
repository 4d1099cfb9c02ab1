use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::transform::Transform;

/// Axis-aligned box laid out around [`Transform::center`].
///
/// `extent_positive` reaches right/down from the pivot, `extent_negative`
/// reaches left/up. Both are in unscaled units and are scaled by
/// `|Transform::scale|` when placed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub extent_positive: Vec2,
    pub extent_negative: Vec2,
}

/// World-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Collider {
    /// Symmetric box with the given half-extents.
    pub fn new(half_width: f32, half_height: f32) -> Self {
        let half = Vec2::new(half_width, half_height).abs();
        Self {
            extent_positive: half,
            extent_negative: half,
        }
    }

    /// Asymmetric box. Negative inputs are taken by magnitude.
    pub fn with_extents(positive: Vec2, negative: Vec2) -> Self {
        Self {
            extent_positive: positive.abs(),
            extent_negative: negative.abs(),
        }
    }

    /// World bounds for an entity placed at `transform`.
    pub fn aabb(&self, transform: &Transform) -> Aabb {
        let scale = transform.scale.abs();
        let min = transform.position + (transform.center - self.extent_negative) * scale;
        let max = transform.position + (transform.center + self.extent_positive) * scale;
        Aabb { min, max }
    }
}

impl Aabb {
    /// Strict overlap: boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth per axis. Zero on both axes unless the boxes
    /// [`overlaps`](Self::overlaps).
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        if !self.overlaps(other) {
            return Vec2::ZERO;
        }
        self.max.min(other.max) - self.min.max(other.min)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
