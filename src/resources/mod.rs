//! Long-lived state shared by systems.
//!
//! Overview
//! - `gameconfig` – physics and player tuning, loaded from an INI file
//! - `input` – per-step button state with edge detection
//! - `player` – jump, coyote and ladder bookkeeping for the single player
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod input;
pub mod player;
pub mod worldtime;
