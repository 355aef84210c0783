//! Line elements drawn with box-drawing glyphs

use crate::buffer::{BitBuffer, Buffer, GlyphTable};
use crate::element::{Element, ElementCore};
use crate::style::Style;

/// The mask a line element contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape {
    Horizontal(i32),
    Vertical(i32),
    /// Outline of a rectangle
    Rectangle { width: i32, height: i32 },
    Custom(BitBuffer),
}

impl LineShape {
    /// The shape as a bit mask with its origin at the top-left
    pub fn bits(&self) -> BitBuffer {
        match self {
            LineShape::Horizontal(len) => {
                let mut bits = BitBuffer::new(*len, 1);
                bits.set_row(0, 0, *len);
                bits
            }
            LineShape::Vertical(len) => {
                let mut bits = BitBuffer::new(1, *len);
                bits.set_column(0, 0, *len);
                bits
            }
            LineShape::Rectangle { width, height } => {
                let (w, h) = (*width, *height);
                let mut bits = BitBuffer::new(w, h);
                bits.set_row(0, 0, w);
                bits.set_row(0, h - 1, w);
                bits.set_column(0, 0, h);
                bits.set_column(w - 1, 0, h);
                bits
            }
            LineShape::Custom(bits) => bits.clone(),
        }
    }
}

/// A line, rectangle or arbitrary mask.
///
/// On its own a line renders with its glyph table. Inside a
/// [`crate::screen::ConnectedLinesScreen`] only its mask is used, so lines
/// that touch join up.
#[derive(Debug, Clone)]
pub struct Line {
    core: ElementCore,
    shape: LineShape,
    glyphs: GlyphTable,
    style: Style,
}

impl Line {
    pub fn new(shape: LineShape) -> Self {
        Self {
            core: ElementCore::new(),
            shape,
            glyphs: GlyphTable::LIGHT,
            style: Style::default(),
        }
    }

    pub fn horizontal(len: i32) -> Self {
        Self::new(LineShape::Horizontal(len))
    }

    pub fn vertical(len: i32) -> Self {
        Self::new(LineShape::Vertical(len))
    }

    pub fn rectangle(width: i32, height: i32) -> Self {
        Self::new(LineShape::Rectangle { width, height })
    }

    /// Builder: glyphs used when rendered on its own
    pub fn glyphs(mut self, glyphs: GlyphTable) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Builder: style used when rendered on its own
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn shape(&self) -> &LineShape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: LineShape) {
        if self.shape != shape {
            self.shape = shape;
            self.core.mark_dirty();
        }
    }

    pub fn bits(&self) -> BitBuffer {
        self.shape.bits()
    }
}

impl Element for Line {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        self.bits().to_buffer(&self.glyphs, self.style)
    }

    fn kind(&self) -> &'static str {
        "line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RenderMode;

    fn plain(line: &mut Line) -> String {
        line.buffer().render(RenderMode::Plain, ' ', Style::default())
    }

    #[test]
    fn test_horizontal_line() {
        assert_eq!(plain(&mut Line::horizontal(4)), "╶──╴");
    }

    #[test]
    fn test_rectangle_outline() {
        let mut rect = Line::rectangle(4, 3).glyphs(GlyphTable::ROUNDED);
        assert_eq!(plain(&mut rect), "╭──╮\n│  │\n╰──╯");
    }

    #[test]
    fn test_single_point() {
        assert_eq!(plain(&mut Line::horizontal(1)), "·");
    }

    #[test]
    fn test_set_shape_marks_dirty() {
        let mut line = Line::vertical(2);
        line.buffer();
        line.set_shape(LineShape::Vertical(2));
        assert!(!line.core().is_dirty());
        line.set_shape(LineShape::Vertical(3));
        assert!(line.core().is_dirty());
        assert_eq!(line.buffer().height(), 3);
    }
}
