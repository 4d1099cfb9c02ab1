//! Component types stored per entity in the [`Registry`](crate::ecs::registry::Registry).
//!
//! Components are plain data. Behaviour lives in [`crate::systems`].
//!
//! Submodules overview:
//! - [`bounce`] – horizontal velocity reflection on wall contact
//! - [`collider`] – axis-aligned box collider and world-space bounds
//! - [`health`] – hit points and contact damage
//! - [`motion`] – velocity, acceleration and terminal velocity
//! - [`pickup`] – collectible items and their effects
//! - [`transform`] – position, scale and collider centre offset
//! - [`ttl`] – remaining lifetime before the entity is destroyed

pub mod bounce;
pub mod collider;
pub mod health;
pub mod motion;
pub mod pickup;
pub mod transform;
pub mod ttl;
