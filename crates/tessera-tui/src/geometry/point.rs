//! 2D coordinate point

use std::ops::{Add, Sub};

/// A 2D coordinate in cell units.
///
/// Coordinates are signed: elements may be placed partly off-screen and are
/// clipped when composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Add an offset to this point, saturating at the `i32` bounds
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.offset(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(10, 20);
        assert_eq!(p.x, 10);
        assert_eq!(p.y, 20);
    }

    #[test]
    fn test_point_offset() {
        let p = Point::new(10, 10);
        assert_eq!(p.offset(5, -3), Point::new(15, 7));
        assert_eq!(p.offset(-20, 0), Point::new(-10, 10));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(4, 2);
        let b = Point::new(1, 3);
        assert_eq!(a + b, Point::new(5, 5));
        assert_eq!(a - b, Point::new(3, -1));
    }

    #[test]
    fn test_point_arithmetic_saturates() {
        let far = Point::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(far.offset(5, -5), Point::new(i32::MAX, i32::MIN));
        assert_eq!(
            Point::new(0, 0) - Point::new(i32::MIN, i32::MAX),
            Point::new(i32::MAX, -i32::MAX)
        );
    }
}
