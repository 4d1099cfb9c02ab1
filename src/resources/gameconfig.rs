//! Game configuration resource.
//!
//! Physics and player tuning loaded from an INI file. Every value has a safe
//! default; missing keys keep it.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 900
//! terminal_velocity_x = 400
//! terminal_velocity_y = 500
//!
//! [player]
//! walk_speed = 120
//! climb_speed = 80
//! jump_speed = 300
//! coyote_time = 0.09
//! jump_tap_window = 0.12
//! jump_hold_window = 0.22
//! jump_cut_factor = 0.6
//!
//! [simulation]
//! fixed_delta = 0.016666668
//! time_scale = 1.0
//! ```

use configparser::ini::Ini;
use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_GRAVITY: f32 = 900.0;
const DEFAULT_TERMINAL_VELOCITY_X: f32 = 400.0;
const DEFAULT_TERMINAL_VELOCITY_Y: f32 = 500.0;
const DEFAULT_WALK_SPEED: f32 = 120.0;
const DEFAULT_CLIMB_SPEED: f32 = 80.0;
const DEFAULT_JUMP_SPEED: f32 = 300.0;
const DEFAULT_COYOTE_TIME: f32 = 0.09;
const DEFAULT_JUMP_TAP_WINDOW: f32 = 0.12;
const DEFAULT_JUMP_HOLD_WINDOW: f32 = 0.22;
const DEFAULT_JUMP_CUT_FACTOR: f32 = 0.6;
const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Downward acceleration applied to the player when not on a ladder.
    pub gravity: f32,
    pub terminal_velocity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            terminal_velocity: Vec2::new(DEFAULT_TERMINAL_VELOCITY_X, DEFAULT_TERMINAL_VELOCITY_Y),
        }
    }
}

/// Player movement tuning. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    pub climb_speed: f32,
    pub jump_speed: f32,
    /// Grace period after walking off a ledge during which a jump still works.
    pub coyote_time: f32,
    /// A released jump press stays buffered this long.
    pub jump_tap_window: f32,
    /// A held jump press stays buffered this long.
    pub jump_hold_window: f32,
    /// Upward speed is multiplied by this when jump is released mid-ascent.
    pub jump_cut_factor: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            climb_speed: DEFAULT_CLIMB_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            coyote_time: DEFAULT_COYOTE_TIME,
            jump_tap_window: DEFAULT_JUMP_TAP_WINDOW,
            jump_hold_window: DEFAULT_JUMP_HOLD_WINDOW,
            jump_cut_factor: DEFAULT_JUMP_CUT_FACTOR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    /// Step length used by the headless runner.
    pub fixed_delta: f32,
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            fixed_delta: DEFAULT_FIXED_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Unparseable or negative
    /// values are reported and ignored. Returns an error if the file cannot
    /// be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let read = |section: &str, key: &str, target: &mut f32| {
            match config.getfloat(section, key) {
                Ok(Some(value)) if value.is_finite() && value >= 0.0 => *target = value as f32,
                Ok(Some(value)) => warn!("Ignoring [{}] {} = {}", section, key, value),
                Ok(None) => {}
                Err(e) => warn!("Ignoring [{}] {}: {}", section, key, e),
            }
        };

        // [physics] section
        read("physics", "gravity", &mut self.physics.gravity);
        read("physics", "terminal_velocity_x", &mut self.physics.terminal_velocity.x);
        read("physics", "terminal_velocity_y", &mut self.physics.terminal_velocity.y);

        // [player] section
        read("player", "walk_speed", &mut self.player.walk_speed);
        read("player", "climb_speed", &mut self.player.climb_speed);
        read("player", "jump_speed", &mut self.player.jump_speed);
        read("player", "coyote_time", &mut self.player.coyote_time);
        read("player", "jump_tap_window", &mut self.player.jump_tap_window);
        read("player", "jump_hold_window", &mut self.player.jump_hold_window);
        read("player", "jump_cut_factor", &mut self.player.jump_cut_factor);

        // [simulation] section
        read("simulation", "fixed_delta", &mut self.fixed_delta);
        read("simulation", "time_scale", &mut self.time_scale);

        info!(
            "Loaded config: gravity={}, jump_speed={}, coyote={}s, buffer={}s/{}s, dt={}",
            self.physics.gravity,
            self.player.jump_speed,
            self.player.coyote_time,
            self.player.jump_tap_window,
            self.player.jump_hold_window,
            self.fixed_delta
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: f32| {
            config.set(section, key, Some(value.to_string()));
        };

        set("physics", "gravity", self.physics.gravity);
        set("physics", "terminal_velocity_x", self.physics.terminal_velocity.x);
        set("physics", "terminal_velocity_y", self.physics.terminal_velocity.y);

        set("player", "walk_speed", self.player.walk_speed);
        set("player", "climb_speed", self.player.climb_speed);
        set("player", "jump_speed", self.player.jump_speed);
        set("player", "coyote_time", self.player.coyote_time);
        set("player", "jump_tap_window", self.player.jump_tap_window);
        set("player", "jump_hold_window", self.player.jump_hold_window);
        set("player", "jump_cut_factor", self.player.jump_cut_factor);

        set("simulation", "fixed_delta", self.fixed_delta);
        set("simulation", "time_scale", self.time_scale);

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
