//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`, owned by the caller and
//! mutated only through `tick` and the transition methods below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::SpeedTier;
use super::geometry::Rectangle;
use super::grid::BrickGrid;
use crate::clamp;
use crate::settings::{ConfigError, GameConfig};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball glued to the bat, waiting for launch input
    Launching,
    /// Active gameplay
    Running,
    /// All bricks cleared, waiting for input to start the next level
    LevelUp,
    /// Ball left the field, waiting for input to serve the next ball
    BallLost,
    /// No lives or levels left, waiting for restart
    GameOver,
}

impl GamePhase {
    /// Whether the simulation is frozen waiting for an activate action
    pub fn is_frozen(self) -> bool {
        matches!(self, GamePhase::LevelUp | GamePhase::BallLost | GamePhase::GameOver)
    }

    /// Overlay message shown while frozen
    pub fn overlay_text(self) -> Option<&'static str> {
        match self {
            GamePhase::LevelUp => Some("LEVEL UP"),
            GamePhase::BallLost => Some("BALL LOST"),
            GamePhase::GameOver => Some("GAME OVER"),
            GamePhase::Launching | GamePhase::Running => None,
        }
    }
}

/// The ball and its per-life bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Unit direction of travel; only its angle matters
    pub direction: Vec2,
    /// Bricks destroyed during the current life
    pub number_of_brick_hits: u32,
    pub top_wall_has_been_hit: bool,
    pub top_rows_has_been_hit: bool,
    /// Set once the ball crosses the bottom of the field
    pub is_lost: bool,
    initial_direction: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, direction: Vec2) -> Self {
        let direction = direction.normalize_or(Vec2::NEG_Y);
        Self {
            pos,
            radius,
            direction,
            number_of_brick_hits: 0,
            top_wall_has_been_hit: false,
            top_rows_has_been_hit: false,
            is_lost: false,
            initial_direction: direction,
        }
    }

    /// Move along the current direction
    #[inline]
    pub fn advance(&mut self, distance: f32) {
        self.pos += self.direction * distance;
    }

    /// Restore the launch direction
    pub fn reset_direction(&mut self) {
        self.direction = self.initial_direction;
    }

    /// Clear everything the difficulty controller reads
    pub fn reset_round_flags(&mut self) {
        self.number_of_brick_hits = 0;
        self.top_wall_has_been_hit = false;
        self.top_rows_has_been_hit = false;
    }

    /// Sit centered on top of the bat
    pub fn glue_to(&mut self, bat: &Bat) {
        let rect = bat.rect();
        self.pos = Vec2::new(rect.left() + rect.width() / 2.0, rect.top() - self.radius);
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bat {
    rect: Rectangle,
    is_small: bool,
    standard_width: f32,
}

impl Bat {
    pub fn new(rect: Rectangle) -> Self {
        Self {
            standard_width: rect.width(),
            rect,
            is_small: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    #[inline]
    pub fn is_small(&self) -> bool {
        self.is_small
    }

    pub fn standard_width(&self) -> f32 {
        self.standard_width
    }

    /// Slide so the left edge sits at `left`, kept inside `field`
    pub fn move_to(&mut self, left: f32, field: &Rectangle) {
        let max_left = field.right() - self.rect.width();
        self.rect.set_left(clamp(left, field.left(), max_left));
    }

    /// Shrink to `factor` of the standard width (once per life)
    pub fn make_small(&mut self, factor: f32) {
        if self.is_small {
            return;
        }
        self.rect.set_width(self.standard_width * factor);
        self.is_small = true;
    }

    pub fn reset_width(&mut self) {
        self.rect.set_width(self.standard_width);
        self.is_small = false;
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Playing field; the ball may only leave through the bottom
    pub field: Rectangle,
    pub ball: Ball,
    pub bat: Bat,
    pub bricks: BrickGrid,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub speed: SpeedTier,
    /// Physics ticks run since the last restart
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game from a configuration, validating it first
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = Rectangle::new(0.0, 0.0, config.field_width, config.field_height)?;
        let bat_rect = Rectangle::new(
            config.field_width / 2.0 - config.bat_width / 2.0,
            config.field_height - 2.0 * config.bat_height,
            config.bat_width,
            config.bat_height,
        )?;
        let bat = Bat::new(bat_rect);
        let mut ball = Ball::new(Vec2::ZERO, config.ball_radius, config.launch_direction);
        ball.glue_to(&bat);
        let bricks = BrickGrid::build(&config)?;

        Ok(Self {
            phase: GamePhase::Launching,
            field,
            ball,
            bat,
            bricks,
            score: 0,
            lives: config.starting_lives,
            level: 1,
            speed: SpeedTier::One,
            time_ticks: 0,
            config,
        })
    }

    /// Current ball speed in pixels per second
    pub fn ball_speed(&self) -> f32 {
        self.speed.speed(&self.config.speed_tiers)
    }

    /// Move the bat toward the input target (left edge)
    pub fn move_bat(&mut self, target_left: f32) {
        self.bat.move_to(target_left, &self.field);
    }

    /// Keep the ball on the bat while launching
    pub fn glue_ball_to_bat(&mut self) {
        self.ball.glue_to(&self.bat);
    }

    /// Release the ball from the bat
    pub fn launch(&mut self) {
        if self.phase != GamePhase::Launching {
            return;
        }
        self.phase = GamePhase::Running;
        log::info!("Ball launched (level {}, lives {})", self.level, self.lives);
    }

    /// Leave LEVEL_UP: fresh bricks, next level, ball back on the bat.
    ///
    /// Speed tier and bat size carry over. The per-life flags carry over too
    /// unless `reset_flags_on_level_up` is set.
    pub fn advance_level(&mut self) {
        if self.phase != GamePhase::LevelUp {
            return;
        }
        self.bricks.reset();
        self.level += 1;
        self.ball.is_lost = false;
        self.ball.reset_direction();
        if self.config.reset_flags_on_level_up {
            self.ball.reset_round_flags();
        }
        self.glue_ball_to_bat();
        self.phase = GamePhase::Launching;
        log::info!("Level {} started", self.level);
    }

    /// Leave BALL_LOST: spend a life and reset everything per-life
    pub fn serve_next_ball(&mut self) {
        if self.phase != GamePhase::BallLost {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.reset_life();
        self.phase = GamePhase::Launching;
        log::info!("Serving next ball ({} lives left)", self.lives);
    }

    /// Leave GAME_OVER: start over from level 1
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.time_ticks = 0;
        self.bricks.reset();
        let centered = self.field.left() + self.field.width() / 2.0 - self.bat.standard_width() / 2.0;
        self.bat.reset_width();
        self.move_bat(centered);
        self.reset_life();
        self.phase = GamePhase::Launching;
        log::info!("Game restarted");
    }

    fn reset_life(&mut self) {
        self.ball.reset_round_flags();
        self.ball.is_lost = false;
        self.ball.reset_direction();
        self.speed = SpeedTier::One;
        self.bat.reset_width();
        // Growing back keeps the left edge, which can push past the right wall
        let left = self.bat.rect().left();
        self.move_bat(left);
        self.glue_ball_to_bat();
    }
}
