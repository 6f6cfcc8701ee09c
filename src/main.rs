//! Breakout entry point
//!
//! Headless native driver: runs the simulation with a simple autopilot at a
//! steady 60 FPS and logs how the round unfolds. Pass a JSON config path as
//! the first argument to override the defaults; `RUST_LOG` controls output.

// The demo loop is native only
#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use breakout::consts::SIM_DT;
use breakout::{GameConfig, Snapshot};
use breakout::sim::{FrameClock, GamePhase, GameState, TickInput, tick};

/// Seconds of simulated play before the demo stops
const DEMO_SECONDS: f64 = 600.0;
const FRAME_SECONDS: f64 = 1.0 / 60.0;
/// Pixels of random aim error the autopilot adds per frame
const AIM_JITTER: f32 = 30.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default config", e);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            std::process::exit(1);
        }
    };

    let seed = 12345;
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut clock = FrameClock::new();
    let mut last_phase = state.phase;
    log::info!("Autopilot seed: {}", seed);

    let frames = (DEMO_SECONDS / FRAME_SECONDS) as u64;
    for frame in 0..frames {
        if state.phase == GamePhase::GameOver {
            break;
        }

        let dt = clock.advance(frame as f64 * FRAME_SECONDS);
        let jitter = rng.random_range(-AIM_JITTER..=AIM_JITTER);
        let mut input = TickInput {
            bat_target_x: Some(state.ball.pos.x - state.bat.rect().width() / 2.0 + jitter),
            activate: state.phase != GamePhase::Running,
        };

        for _ in 0..clock.fixed_steps(dt) {
            tick(&mut state, &input, SIM_DT);
            // One-shot input
            input.activate = false;
        }

        if state.phase != last_phase {
            let snapshot = Snapshot::capture(&state);
            match snapshot.overlay_text() {
                Some(text) => log::info!("{} | {}", text, snapshot.stats_line()),
                None => log::debug!("{:?} | {}", state.phase, snapshot.stats_line()),
            }
            last_phase = state.phase;
        }
    }

    let snapshot = Snapshot::capture(&state);
    println!(
        "{} | level {} | {} bricks left | {:.0} FPS",
        snapshot.stats_line(),
        snapshot.level,
        snapshot.bricks.len(),
        clock.fps()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `tick` themselves
}
