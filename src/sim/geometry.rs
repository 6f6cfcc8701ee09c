//! Geometry primitives: axis-aligned rectangles and heading math
//!
//! Screen coordinates: x grows right, y grows down. Headings are radians as
//! returned by `atan2(y, x)`, so "straight up" is `-π/2`.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rejected rectangle dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    NonPositiveWidth(f32),
    NonPositiveHeight(f32),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NonPositiveWidth(w) => write!(f, "rectangle width must be > 0, got {}", w),
            GeometryError::NonPositiveHeight(h) => {
                write!(f, "rectangle height must be > 0, got {}", h)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Direction helpers on top of `Vec2`
pub trait Heading {
    /// Angle of the vector, `atan2(y, x)`
    fn heading(self) -> f32;
    /// Same magnitude, pointing along `angle`
    fn with_heading(self, angle: f32) -> Self;
    /// Mirror horizontally (vertical wall bounce)
    fn invert_x(&mut self);
    /// Mirror vertically (horizontal wall bounce)
    fn invert_y(&mut self);
}

impl Heading for Vec2 {
    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn with_heading(self, angle: f32) -> Self {
        Vec2::from_angle(angle) * self.length()
    }

    #[inline]
    fn invert_x(&mut self) {
        self.x = -self.x;
    }

    #[inline]
    fn invert_y(&mut self) {
        self.y = -self.y;
    }
}

/// Check if `target` lies on the shorter arc between two headings.
///
/// Both bounds are ordered first, so the result doesn't depend on argument
/// order. When the arc between them is wider than π the complementary arc is
/// used, which is the one that crosses the -π/π seam.
pub fn is_heading_between(target: f32, a: f32, b: f32) -> bool {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    if high - low <= PI {
        low <= target && target <= high
    } else {
        target >= high || target <= low
    }
}

/// Axis-aligned rectangle with strictly positive extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleFields")]
pub struct Rectangle {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

/// Unchecked wire form; deserialized rectangles go through `Rectangle::new`
#[derive(Deserialize)]
struct RectangleFields {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl TryFrom<RectangleFields> for Rectangle {
    type Error = GeometryError;

    fn try_from(fields: RectangleFields) -> Result<Self, Self::Error> {
        Rectangle::new(fields.left, fields.top, fields.width, fields.height)
    }
}

impl Rectangle {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        if width.is_nan() || width <= 0.0 {
            return Err(GeometryError::NonPositiveWidth(width));
        }
        if height.is_nan() || height <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Horizontal move; only the bat slides
    pub(crate) fn set_left(&mut self, left: f32) {
        self.left = left;
    }

    /// Resize horizontally, keeping the left edge; only the bat resizes
    pub(crate) fn set_width(&mut self, width: f32) {
        debug_assert!(width > 0.0);
        if width > 0.0 {
            self.width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rectangle_edges() {
        let rect = Rectangle::new(10.0, 20.0, 30.0, 15.0).unwrap();
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 35.0);
        assert_eq!(rect.center(), Vec2::new(25.0, 27.5));
    }

    #[test]
    fn test_rectangle_rejects_degenerate_size() {
        assert_eq!(
            Rectangle::new(0.0, 0.0, 0.0, 10.0),
            Err(GeometryError::NonPositiveWidth(0.0))
        );
        assert_eq!(
            Rectangle::new(0.0, 0.0, 10.0, -1.0),
            Err(GeometryError::NonPositiveHeight(-1.0))
        );
        assert!(Rectangle::new(0.0, 0.0, f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_deserialize_checks_size() {
        let rect: Rectangle =
            serde_json::from_str(r#"{"left":1,"top":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(rect, Rectangle::new(1.0, 2.0, 3.0, 4.0).unwrap());

        let bad = serde_json::from_str::<Rectangle>(r#"{"left":0,"top":0,"width":0,"height":-1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_heading_and_inversion() {
        let mut dir = Vec2::new(0.0, 1.0);
        assert!((dir.heading() - FRAC_PI_2).abs() < 1e-6);

        dir.invert_y();
        assert_eq!(dir.heading(), -FRAC_PI_2);

        dir.invert_x();
        assert_eq!(dir, Vec2::new(-0.0, -1.0));
    }

    #[test]
    fn test_with_heading_keeps_magnitude() {
        let dir = Vec2::new(3.0, 4.0);
        let turned = dir.with_heading(-FRAC_PI_2);
        assert!((turned.length() - 5.0).abs() < 1e-5);
        assert!(turned.x.abs() < 1e-5);
        assert!((turned.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_between_no_wrap() {
        assert!(is_heading_between(0.5, 0.0, 1.0));
        assert!(is_heading_between(0.5, 1.0, 0.0));
        assert!(!is_heading_between(1.5, 0.0, 1.0));
        assert!(!is_heading_between(-0.1, 0.0, 1.0));
    }

    #[test]
    fn test_heading_between_across_seam() {
        // Arc from 170° to -170° crosses ±180°
        let a = 170.0_f32.to_radians();
        let b = -170.0_f32.to_radians();
        assert!(is_heading_between(PI, a, b));
        assert!(is_heading_between(-PI + 0.01, a, b));
        assert!(is_heading_between(175.0_f32.to_radians(), b, a));
        assert!(!is_heading_between(0.0, a, b));
        assert!(!is_heading_between(FRAC_PI_2, a, b));
    }

    #[test]
    fn test_heading_between_includes_bounds() {
        assert!(is_heading_between(0.0, 0.0, 1.0));
        assert!(is_heading_between(1.0, 0.0, 1.0));
        assert!(is_heading_between(-3.0, 3.0, -3.0));
    }

    proptest! {
        #[test]
        fn prop_heading_between_is_symmetric(
            target in -PI..PI,
            a in -PI..PI,
            b in -PI..PI,
        ) {
            prop_assert_eq!(is_heading_between(target, a, b), is_heading_between(target, b, a));
        }

        #[test]
        fn prop_inversion_keeps_magnitude(x in -10.0f32..10.0, y in -10.0f32..10.0) {
            let dir = Vec2::new(x, y);
            let mut flipped_x = dir;
            flipped_x.invert_x();
            let mut flipped_y = dir;
            flipped_y.invert_y();
            prop_assert_eq!(flipped_x.length(), dir.length());
            prop_assert_eq!(flipped_y.length(), dir.length());
        }
    }
}
