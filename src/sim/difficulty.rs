//! Difficulty ramp: speed tiers and paddle shrink
//!
//! Rules only ever raise difficulty within a life; `GameState` resets them
//! together when the next ball is served.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Bat};
use crate::settings::GameConfig;

/// Discrete ball speed levels, slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeedTier {
    One,
    Two,
    Three,
    Four,
}

impl SpeedTier {
    pub fn index(self) -> usize {
        match self {
            SpeedTier::One => 0,
            SpeedTier::Two => 1,
            SpeedTier::Three => 2,
            SpeedTier::Four => 3,
        }
    }

    /// Look up this tier's speed (pixels per second)
    pub fn speed(self, tiers: &[f32; 4]) -> f32 {
        tiers[self.index()]
    }

    /// Raise to `target`, never lower. Returns true if the tier changed.
    pub fn raise_to(&mut self, target: SpeedTier) -> bool {
        if target > *self {
            *self = target;
            true
        } else {
            false
        }
    }
}

/// Apply the difficulty rules for one running tick
pub fn update_difficulty(ball: &Ball, bat: &mut Bat, speed: &mut SpeedTier, config: &GameConfig) {
    let before = *speed;

    if ball.number_of_brick_hits == config.hits_for_tier_2 {
        speed.raise_to(SpeedTier::Two);
    }
    if ball.number_of_brick_hits == config.hits_for_tier_3 {
        speed.raise_to(SpeedTier::Three);
    }
    if ball.top_rows_has_been_hit {
        speed.raise_to(SpeedTier::Four);
    }
    if *speed != before {
        log::debug!("Speed raised {:?} -> {:?}", before, speed);
    }

    if ball.top_wall_has_been_hit && !bat.is_small() {
        bat.make_small(config.bat_shrink_factor);
        log::debug!("Bat shrunk to {:.1}", bat.rect().width());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rectangle;
    use glam::Vec2;

    fn fixtures() -> (Ball, Bat, SpeedTier, GameConfig) {
        let ball = Ball::new(Vec2::new(100.0, 300.0), 5.0, Vec2::new(0.7, -1.0));
        let bat = Bat::new(Rectangle::new(200.0, 585.0, 90.0, 7.5).unwrap());
        (ball, bat, SpeedTier::One, GameConfig::default())
    }

    #[test]
    fn test_tier_ordering() {
        assert!(SpeedTier::One < SpeedTier::Two);
        assert!(SpeedTier::Three < SpeedTier::Four);
        assert_eq!(SpeedTier::Four.speed(&[1.0, 2.0, 3.0, 4.0]), 4.0);
    }

    #[test]
    fn test_hit_counts_raise_speed() {
        let (mut ball, mut bat, mut speed, config) = fixtures();

        ball.number_of_brick_hits = 3;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(speed, SpeedTier::One);

        ball.number_of_brick_hits = 4;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(speed, SpeedTier::Two);

        ball.number_of_brick_hits = 12;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(speed, SpeedTier::Three);
    }

    #[test]
    fn test_top_rows_jump_to_fastest() {
        let (mut ball, mut bat, mut speed, config) = fixtures();
        ball.top_rows_has_been_hit = true;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(speed, SpeedTier::Four);

        // A later hit-count rule never lowers it
        ball.number_of_brick_hits = 4;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(speed, SpeedTier::Four);
    }

    #[test]
    fn test_top_wall_shrinks_bat_once() {
        let (mut ball, mut bat, mut speed, config) = fixtures();
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert!(!bat.is_small());

        ball.top_wall_has_been_hit = true;
        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert!(bat.is_small());
        let shrunk = bat.rect().width();

        update_difficulty(&ball, &mut bat, &mut speed, &config);
        assert_eq!(bat.rect().width(), shrunk);
    }

    #[test]
    fn test_speed_is_monotonic_over_a_life() {
        let (mut ball, mut bat, mut speed, config) = fixtures();
        let mut last = speed;
        for hits in 0..20 {
            ball.number_of_brick_hits = hits;
            ball.top_rows_has_been_hit = hits >= 15;
            update_difficulty(&ball, &mut bat, &mut speed, &config);
            assert!(speed >= last);
            last = speed;
        }
        assert_eq!(speed, SpeedTier::Four);
    }
}
