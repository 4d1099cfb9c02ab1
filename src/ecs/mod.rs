//! Entity/component storage.
//!
//! - [`entity`] – entity identities and tags
//! - [`store`] – densely packed, swap-remove component storage
//! - [`registry`] – one store per component kind plus whole-entity operations

pub mod entity;
pub mod registry;
pub mod store;
