//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Stable iteration order (row-major bricks, fixed probe order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{BrickHit, PointOfImpact, ball_to_rectangle, intersects};
pub use difficulty::{SpeedTier, update_difficulty};
pub use geometry::{GeometryError, Heading, Rectangle, is_heading_between};
pub use grid::{Brick, BrickGrid};
pub use state::{Ball, Bat, GamePhase, GameState};
pub use tick::{TickInput, tick};
