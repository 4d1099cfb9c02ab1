//! Simulation systems.
//!
//! Each system is a plain function over the [`Registry`](crate::ecs::registry::Registry)
//! and whatever resources it needs. [`crate::game::Game::step`] calls them in
//! order.
//!
//! Submodules overview
//! - [`blocking`] – contact classification and push-out against solid geometry
//! - [`collision`] – pairwise overlap tests and collision event emission
//! - [`damage`] – contact damage, invulnerability and death
//! - [`movement`] – integrate velocities into positions
//! - [`pickup`] – player item collection
//! - [`player`] – player walking, ladders and jumping
//! - [`time`] – advance simulation time and delta
//! - [`ttl`] – expire entities whose lifetime ran out

pub mod blocking;
pub mod collision;
pub mod damage;
pub mod movement;
pub mod pickup;
pub mod player;
pub mod time;
pub mod ttl;
