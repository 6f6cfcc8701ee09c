//! Game configuration
//!
//! Loaded from JSON by hosts that want to tune the game; every field has a
//! default matching the classic layout.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::{GeometryError, Rectangle};

/// Why a configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    Geometry(GeometryError),
    Parse(serde_json::Error),
    Io(std::io::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Geometry(e) => write!(f, "invalid geometry: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config: {}", e),
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Geometry(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(e: GeometryError) -> Self {
        ConfigError::Geometry(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Tunable game parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Bricks ===
    pub columns: u32,
    pub rows: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Rows before this one start inactive
    pub first_active_row: u32,
    /// Rows that trigger the fastest speed tier when hit
    pub top_rows: Vec<u32>,

    // === Bat ===
    pub bat_width: f32,
    pub bat_height: f32,
    /// Width multiplier applied once the ball reaches the top wall
    pub bat_shrink_factor: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Direction at launch; normalized on use
    pub launch_direction: Vec2,

    // === Difficulty ===
    /// Ball speed per tier in pixels per second
    pub speed_tiers: [f32; 4],
    pub hits_for_tier_2: u32,
    pub hits_for_tier_3: u32,
    /// Also clear hit count and wall/top-row flags when a level is cleared
    pub reset_flags_on_level_up: bool,

    // === Progression ===
    pub starting_lives: u32,
    pub max_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            columns: COLUMNS,
            rows: ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            first_active_row: FIRST_ACTIVE_ROW,
            top_rows: vec![4, 5],

            bat_width: BAT_WIDTH,
            bat_height: BAT_HEIGHT,
            bat_shrink_factor: BAT_SHRINK_FACTOR,

            ball_radius: BALL_RADIUS,
            launch_direction: Vec2::new(0.7, -1.0),

            speed_tiers: SPEED_TIERS,
            hits_for_tier_2: HITS_FOR_TIER_2,
            hits_for_tier_3: HITS_FOR_TIER_3,
            reset_flags_on_level_up: false,

            starting_lives: STARTING_LIVES,
            max_level: MAX_LEVEL,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        Rectangle::new(0.0, 0.0, self.field_width, self.field_height)?;
        Rectangle::new(0.0, 0.0, self.brick_width, self.brick_height)?;
        Rectangle::new(0.0, 0.0, self.bat_width, self.bat_height)?;

        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid("grid needs at least one row and column"));
        }
        if self.first_active_row >= self.rows {
            return Err(ConfigError::Invalid("no brick rows start active"));
        }
        if self.bat_width > self.field_width {
            return Err(ConfigError::Invalid("bat is wider than the field"));
        }
        if 2.0 * self.bat_height >= self.field_height {
            return Err(ConfigError::Invalid("bat does not fit in the field"));
        }
        if !(self.bat_shrink_factor > 0.0 && self.bat_shrink_factor <= 1.0) {
            return Err(ConfigError::Invalid("bat shrink factor must be in (0, 1]"));
        }
        if !(self.ball_radius > 0.0) || 2.0 * self.ball_radius >= self.field_width {
            return Err(ConfigError::Invalid("ball radius out of range"));
        }
        if !(self.launch_direction.y < 0.0) || !self.launch_direction.is_finite() {
            return Err(ConfigError::Invalid("launch direction must point up"));
        }
        if self.speed_tiers.iter().any(|s| !(*s > 0.0)) {
            return Err(ConfigError::Invalid("speed tiers must be positive"));
        }
        if self.speed_tiers.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::Invalid("speed tiers must not decrease"));
        }
        if self.hits_for_tier_2 >= self.hits_for_tier_3 {
            return Err(ConfigError::Invalid("tier 3 must need more hits than tier 2"));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("need at least one life"));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid("need at least one level"));
        }
        Ok(())
    }
}
