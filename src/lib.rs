//! Breakout - a paddle-and-bricks arcade physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, brick grid, game state)
//! - `snapshot`: Read-only view of a round for renderers and scoreboards
//! - `settings`: Data-driven game configuration

pub mod settings;
pub mod sim;
pub mod snapshot;

pub use settings::{ConfigError, GameConfig};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz) for hosts that step at a fixed rate
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest delta time a single tick will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Brick grid layout
    pub const COLUMNS: u32 = 18;
    pub const ROWS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 30.0;
    pub const BRICK_HEIGHT: f32 = 15.0;
    /// Rows above this index start inactive
    pub const FIRST_ACTIVE_ROW: u32 = 4;

    /// Play field (grid is as wide as the field)
    pub const FIELD_WIDTH: f32 = COLUMNS as f32 * BRICK_WIDTH;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bat defaults
    pub const BAT_WIDTH: f32 = 3.0 * BRICK_WIDTH;
    pub const BAT_HEIGHT: f32 = 0.5 * BRICK_HEIGHT;
    pub const BAT_SHRINK_FACTOR: f32 = 2.0 / 3.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;

    /// Speed tiers in pixels per second
    pub const SPEED_TIERS: [f32; 4] = [150.0, 210.0, 270.0, 360.0];

    /// Brick hit counts that raise the speed tier
    pub const HITS_FOR_TIER_2: u32 = 4;
    pub const HITS_FOR_TIER_3: u32 = 12;

    pub const STARTING_LIVES: u32 = 5;
    pub const MAX_LEVEL: u32 = 2;

    /// Paddle aim clamp (radians)
    pub const MIN_BOUNCE_HEADING: f32 = -std::f32::consts::PI * 0.80;
    pub const MAX_BOUNCE_HEADING: f32 = -std::f32::consts::PI * 0.20;
    /// Radians of redirect per paddle width of offset from center
    pub const PADDLE_AIM_FACTOR: f32 = 4.0;
}

/// Clamp a value into `[min, max]`; unlike `f32::clamp` this never panics when `min > max`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
