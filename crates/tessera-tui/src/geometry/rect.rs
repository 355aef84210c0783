//! Rectangular region in cell space

use super::{Point, Size};

/// A rectangular region in cell space.
///
/// The origin may be negative; width and height never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle; negative dimensions become zero
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        let size = Size::new(width, height);
        Self {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    /// Create a rectangle at origin with given size
    pub const fn sized(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Create from position and size
    pub const fn from_pos_size(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Empty rectangle
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Check if the rectangle is empty
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the top-left corner position
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the size
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the left edge x coordinate
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Get the right edge x coordinate (exclusive), saturating at `i32::MAX`
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the top edge y coordinate
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Get the bottom edge y coordinate (exclusive), saturating at `i32::MAX`
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside this rectangle
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the rectangle by the given offset; the origin saturates
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Get the intersection of two rectangles
    pub fn intersect(&self, other: &Rect) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x >= right || y >= bottom {
            Self::empty()
        } else {
            Self::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
        }
    }
}
