//! Collision detection and response between the ball and rectangles
//!
//! The tricky part is deciding which face of a rectangle the ball entered
//! through. The rectangle is inflated by the ball radius, the four inflated
//! corners split the plane around the ball centre into sectors, and the
//! sector holding the reversed direction of travel names the face.

use glam::Vec2;

use super::geometry::{Heading, Rectangle, is_heading_between};
use super::grid::BrickGrid;
use super::state::{Ball, Bat};
use crate::clamp;
use crate::consts::{MAX_BOUNCE_HEADING, MIN_BOUNCE_HEADING, PADDLE_AIM_FACTOR};

/// Face of a rectangle involved in a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOfImpact {
    None,
    Left,
    Right,
    Top,
    Bottom,
}

/// A brick destroyed by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub column: u32,
    pub row: u32,
    pub score: u32,
    pub impact: PointOfImpact,
}

/// Circle vs axis-aligned rectangle overlap.
///
/// Deliberately generous: once neither axis rules the circle out, either
/// axis admitting it counts as overlap, so the exact corner-distance test is
/// only reached when both axis checks fail.
pub fn intersects(center: Vec2, radius: f32, rect: &Rectangle) -> bool {
    let half_width = rect.width() / 2.0;
    let half_height = rect.height() / 2.0;

    let dist_x = (center.x - (rect.left() + half_width)).abs();
    let dist_y = (center.y - (rect.top() + half_height)).abs();

    if dist_x > half_width + radius || dist_y > half_height + radius {
        return false;
    }

    if dist_x <= half_width + radius || dist_y <= half_height + radius {
        return true;
    }

    let corner_distance_sq = (dist_x - half_width).powi(2) + (dist_y - half_height).powi(2);
    corner_distance_sq <= radius * radius
}

/// Classify which face of `rect` a moving ball struck.
///
/// Sectors are tested TOP, LEFT, BOTTOM, RIGHT and the first match wins, so a
/// heading exactly on a sector boundary resolves deterministically.
pub fn ball_to_rectangle(center: Vec2, radius: f32, direction: Vec2, rect: &Rectangle) -> PointOfImpact {
    if !intersects(center, radius, rect) {
        return PointOfImpact::None;
    }

    // Counter-clockwise from the upper right inflated corner
    let h1 = (Vec2::new(rect.right() + radius, rect.top() - radius) - center).heading();
    let mut h2 = (Vec2::new(rect.left() - radius, rect.top() - radius) - center).heading();
    let h3 = (Vec2::new(rect.left() - radius, rect.bottom() + radius) - center).heading();
    let h4 = (Vec2::new(rect.right() + radius, rect.bottom() + radius) - center).heading();

    // Level with the inflated top edge atan2 yields +π for h2, which puts it
    // on the wrong side of the seam
    if center.y == rect.top() - radius {
        h2 = -h2;
    }

    let inverted_heading = (-direction).heading();
    if is_heading_between(inverted_heading, h1, h2) {
        PointOfImpact::Top
    } else if is_heading_between(inverted_heading, h2, h3) {
        PointOfImpact::Left
    } else if is_heading_between(inverted_heading, h3, h4) {
        PointOfImpact::Bottom
    } else {
        PointOfImpact::Right
    }
}

/// Flip the direction component facing the struck face
pub fn bounce(direction: &mut Vec2, impact: PointOfImpact) {
    match impact {
        PointOfImpact::Left | PointOfImpact::Right => direction.invert_x(),
        PointOfImpact::Top | PointOfImpact::Bottom => direction.invert_y(),
        PointOfImpact::None => {}
    }
}

/// Keep the ball inside the field.
///
/// Side and top walls reflect and clamp; the bottom is open and only marks
/// the ball as lost. A wall only flips the direction while the ball is
/// heading into it, so a ball already turned back is never sent outward.
/// Returns the first face handled.
pub fn resolve_wall_collision(ball: &mut Ball, field: &Rectangle) -> PointOfImpact {
    let r = ball.radius;
    let mut impact = PointOfImpact::None;

    let min_x = field.left() + r;
    let max_x = field.right() - r;
    if ball.pos.x < min_x {
        if ball.direction.x < 0.0 {
            ball.direction.invert_x();
        }
        ball.pos.x = clamp(ball.pos.x, min_x, max_x);
        impact = PointOfImpact::Left;
    } else if ball.pos.x > max_x {
        if ball.direction.x > 0.0 {
            ball.direction.invert_x();
        }
        ball.pos.x = clamp(ball.pos.x, min_x, max_x);
        impact = PointOfImpact::Right;
    }

    let min_y = field.top() + r;
    let max_y = field.bottom() - r;
    if ball.pos.y < min_y {
        if ball.direction.y < 0.0 {
            ball.direction.invert_y();
        }
        ball.pos.y = clamp(ball.pos.y, min_y, max_y);
        ball.top_wall_has_been_hit = true;
        if impact == PointOfImpact::None {
            impact = PointOfImpact::Top;
        }
    } else if ball.pos.y > max_y {
        ball.is_lost = true;
        if impact == PointOfImpact::None {
            impact = PointOfImpact::Bottom;
        }
    }

    impact
}

/// Bounce off the bat's top face and aim by where the ball landed.
///
/// Hits on the sides or underside are ignored. Landing left of centre turns
/// the ball left, right of centre turns it right; the result is clamped so
/// the ball never leaves nearly parallel to the bat.
pub fn resolve_bat_collision(ball: &mut Ball, bat: &Bat) -> bool {
    let rect = bat.rect();
    if ball_to_rectangle(ball.pos, ball.radius, ball.direction, rect) != PointOfImpact::Top {
        return false;
    }

    ball.direction.invert_y();
    ball.pos.y = rect.top() - ball.radius;

    let impact_rotation = ((ball.pos.x - rect.left()) / rect.width() - 0.5) * PADDLE_AIM_FACTOR;
    let new_heading = clamp(
        ball.direction.heading() + impact_rotation,
        MIN_BOUNCE_HEADING,
        MAX_BOUNCE_HEADING,
    );
    ball.direction = ball.direction.with_heading(new_heading);
    true
}

/// Destroy at most one brick near the ball and bounce off it
pub fn resolve_brick_collision(ball: &mut Ball, bricks: &mut BrickGrid) -> Option<BrickHit> {
    for index in bricks.candidates(ball.pos) {
        let Some(brick) = bricks.brick_mut(index) else {
            continue;
        };

        let impact = ball_to_rectangle(ball.pos, ball.radius, ball.direction, brick.rect());
        if impact == PointOfImpact::None {
            continue;
        }

        bounce(&mut ball.direction, impact);
        brick.active = false;
        ball.number_of_brick_hits += 1;
        ball.top_rows_has_been_hit |= brick.is_top_row;

        return Some(BrickHit {
            column: brick.column,
            row: brick.row,
            score: brick.score,
            impact,
        });
    }

    None
}
