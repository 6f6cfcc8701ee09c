//! Read-only view of a round for renderers and scoreboards
//!
//! The simulation never draws. Hosts take a `Snapshot` after each tick and
//! either draw it directly or upload `instances()` to a GPU buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::sim::geometry::Rectangle;
use crate::sim::grid::row_color;
use crate::sim::{GamePhase, GameState};

/// Bat fill color (0xRRGGBB)
pub const BAT_COLOR: u32 = 0xD45345;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl RectView {
    fn new(rect: &Rectangle, color: u32) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    /// Color of the brick row the ball is passing through
    pub color: u32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub ball: BallView,
    pub bat: RectView,
    /// Active bricks only
    pub bricks: Vec<RectView>,
}

/// GPU instance for a filled rectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub min: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
}

impl From<&RectView> for RectInstance {
    fn from(view: &RectView) -> Self {
        Self {
            min: Vec2::new(view.left, view.top),
            size: Vec2::new(view.width, view.height),
            color: rgb_to_rgba(view.color),
        }
    }
}

/// Unpack 0xRRGGBB into opaque RGBA floats
pub fn rgb_to_rgba(rgb: u32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let (_, row) = state.bricks.cell_at(state.ball.pos);

        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            level: state.level,
            ball: BallView {
                pos: state.ball.pos,
                radius: state.ball.radius,
                color: row_color(row),
            },
            bat: RectView::new(state.bat.rect(), BAT_COLOR),
            bricks: state
                .bricks
                .active_bricks()
                .map(|b| RectView::new(b.rect(), b.color))
                .collect(),
        }
    }

    /// Bricks then bat, ready for an instance buffer
    pub fn instances(&self) -> Vec<RectInstance> {
        self.bricks
            .iter()
            .chain(std::iter::once(&self.bat))
            .map(RectInstance::from)
            .collect()
    }

    /// Raw bytes of `instances()` for upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }

    /// Scoreboard line
    pub fn stats_line(&self) -> String {
        format!("SCORE: {}   LIVES: {}", self.score, self.lives)
    }

    /// Centered message while the game is frozen
    pub fn overlay_text(&self) -> Option<&'static str> {
        self.phase.overlay_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    fn snapshot() -> Snapshot {
        let state = GameState::new(GameConfig::default()).unwrap();
        Snapshot::capture(&state)
    }

    #[test]
    fn test_capture_new_game() {
        let snap = snapshot();
        assert_eq!(snap.phase, GamePhase::Launching);
        assert_eq!(snap.bricks.len(), 6 * 18);
        assert_eq!(snap.bat.color, BAT_COLOR);
        assert_eq!(snap.stats_line(), "SCORE: 0   LIVES: 5");
        assert_eq!(snap.overlay_text(), None);
    }

    #[test]
    fn test_ball_color_follows_row() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.ball.pos = Vec2::new(100.0, 9.5 * 15.0);
        assert_eq!(Snapshot::capture(&state).ball.color, 0x3F4FCE);
    }

    #[test]
    fn test_instances_layout() {
        let snap = snapshot();
        let instances = snap.instances();
        assert_eq!(instances.len(), snap.bricks.len() + 1);

        let bat = instances.last().unwrap();
        assert_eq!(bat.min, Vec2::new(snap.bat.left, snap.bat.top));
        assert_eq!(bat.color, rgb_to_rgba(BAT_COLOR));

        assert_eq!(
            snap.instance_bytes().len(),
            instances.len() * std::mem::size_of::<RectInstance>()
        );
        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
    }

    #[test]
    fn test_rgb_unpacking() {
        assert_eq!(rgb_to_rgba(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_to_rgba(0x0000FF), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_snapshot_serializes_for_hosts() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["phase"], "Launching");
        assert_eq!(json["lives"], 5);
        assert_eq!(json["bricks"].as_array().unwrap().len(), 108);
    }
}
