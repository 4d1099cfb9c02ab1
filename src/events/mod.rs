//! Per-step events.
//!
//! Submodules:
//! - [`collision`] – overlap notifications produced by the collision detector
pub mod collision;
