//! Aberred Core library.
//!
//! A headless 2D platformer simulation: a small component store and entity
//! registry, AABB collision detection, contact resolution against solid
//! geometry, and a player controller with coyote time, jump buffering and
//! variable jump height.

pub mod components;
pub mod ecs;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
