//! A single terminal cell with optional content and optional style

use crate::style::Style;

/// A single terminal cell.
///
/// Both channels are optional. A cell with neither a character nor a style
/// is transparent when composited onto another buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cell {
    /// The character displayed
    pub ch: Option<char>,
    /// Style descriptor, `None` inherits the screen default
    pub style: Option<Style>,
}

impl Cell {
    /// Create a fully transparent cell
    pub const fn empty() -> Self {
        Self {
            ch: None,
            style: None,
        }
    }

    /// Create a cell with a character and no style
    pub const fn new(ch: char) -> Self {
        Self {
            ch: Some(ch),
            style: None,
        }
    }

    /// Apply a style to this cell
    pub const fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// True when neither channel is set
    pub const fn is_transparent(&self) -> bool {
        self.ch.is_none() && self.style.is_none()
    }

    /// Reset the cell to transparent
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Self::new(c)
    }
}
