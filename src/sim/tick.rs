//! Per-frame simulation tick
//!
//! Core game loop: the phase decides what may move, the physics step runs
//! collisions in a fixed order, then terminal conditions pick the next phase.

use super::collision::{resolve_bat_collision, resolve_brick_collision, resolve_wall_collision};
use super::difficulty::update_difficulty;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target left edge of the bat (from pointer/touch position)
    pub bat_target_x: Option<f32>,
    /// Launch ball / continue past LEVEL_UP or BALL_LOST / restart after GAME_OVER
    pub activate: bool,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // First frames and hitches must not teleport the ball
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    match state.phase {
        GamePhase::Launching => {
            if let Some(target) = input.bat_target_x {
                state.move_bat(target);
            }
            state.glue_ball_to_bat();

            if input.activate {
                state.launch();
            }
        }

        GamePhase::Running => {
            state.time_ticks += 1;
            if let Some(target) = input.bat_target_x {
                state.move_bat(target);
            }

            step_physics(state, dt);
            evaluate_round(state);
        }

        GamePhase::LevelUp => {
            if input.activate {
                state.advance_level();
            }
        }

        GamePhase::BallLost => {
            if input.activate {
                state.serve_next_ball();
            }
        }

        GamePhase::GameOver => {
            if input.activate {
                state.restart();
            }
        }
    }
}

/// Move the ball and resolve walls, bat, then bricks
fn step_physics(state: &mut GameState, dt: f32) {
    let distance = state.ball_speed() * dt;
    state.ball.advance(distance);

    resolve_wall_collision(&mut state.ball, &state.field);
    resolve_bat_collision(&mut state.ball, &state.bat);

    if let Some(hit) = resolve_brick_collision(&mut state.ball, &mut state.bricks) {
        state.score += u64::from(hit.score);
        log::debug!(
            "Brick ({}, {}) hit on {:?} for {} points, score {}",
            hit.column,
            hit.row,
            hit.impact,
            hit.score,
            state.score
        );
    }

    update_difficulty(&state.ball, &mut state.bat, &mut state.speed, &state.config);
}

/// Check for a lost ball or a cleared level and freeze accordingly
fn evaluate_round(state: &mut GameState) {
    if state.ball.is_lost {
        if state.lives <= 1 {
            state.lives = state.lives.saturating_sub(1);
            set_phase(state, GamePhase::GameOver);
        } else {
            set_phase(state, GamePhase::BallLost);
        }
        return;
    }

    if state.bricks.active_count() == 0 {
        if state.level < state.config.max_level {
            set_phase(state, GamePhase::LevelUp);
        } else {
            set_phase(state, GamePhase::GameOver);
        }
    }
}

fn set_phase(state: &mut GameState, phase: GamePhase) {
    log::info!(
        "{:?} -> {:?} (score {}, lives {}, level {})",
        state.phase,
        phase,
        state.score,
        state.lives,
        state.level
    );
    state.phase = phase;
}
