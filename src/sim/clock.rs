//! Frame timing for hosts driving `tick`
//!
//! Turns frame timestamps into clamped delta times and an FPS estimate, and
//! optionally slices frames into fixed substeps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    /// Unclamped time between the last two frames (seconds)
    delta_time: f32,
    fps: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` (seconds) and return the delta time to simulate.
    ///
    /// The first frame has no predecessor and yields zero.
    pub fn advance(&mut self, now: f64) -> f32 {
        let raw = match self.last_timestamp {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        self.delta_time = raw;
        self.fps = if raw > 0.0 { 1.0 / raw } else { 0.0 };
        raw.min(MAX_FRAME_DT)
    }

    /// Number of fixed `SIM_DT` steps owed after a frame of `dt` seconds
    pub fn fixed_steps(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.5), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_delta_and_fps() {
        let mut clock = FrameClock::new();
        clock.advance(10.0);
        let dt = clock.advance(10.02);
        assert!((dt - 0.02).abs() < 1e-4);
        assert!((clock.fps() - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(3.0), MAX_FRAME_DT);
        assert_eq!(clock.delta_time(), 3.0);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut clock = FrameClock::new();
        // Half a step owes nothing yet
        assert_eq!(clock.fixed_steps(SIM_DT * 0.5), 0);
        assert_eq!(clock.fixed_steps(SIM_DT * 0.6), 1);
        // Huge frames are capped
        assert_eq!(clock.fixed_steps(10.0), MAX_SUBSTEPS);
    }
}
