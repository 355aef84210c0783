//! Size with width and height

/// Size representing width and height in terminal cells.
///
/// Both dimensions are clamped to zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size; negative dimensions become zero
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Zero size
    pub const fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    /// Check if the size is empty (zero area)
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Calculate the area (number of cells)
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(i32::from(width), i32::from(height))
    }
}
