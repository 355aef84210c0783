//! Boolean grid used to accumulate line masks

use super::{Buffer, GlyphTable};
use crate::geometry::{Rect, Size};
use crate::style::Style;

/// 2D grid of booleans.
///
/// Line elements draw their masks into a shared `BitBuffer`; the combined
/// mask is turned into box-drawing glyphs in a single pass so that crossing
/// lines join up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitBuffer {
    size: Size,
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Create an all-false grid; negative dimensions become zero
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            bits: vec![false; size.area()],
        }
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if Rect::sized(self.size).contains(x, y) {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read a bit; out of range reads are false
    pub fn get_bit(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.bits[i])
    }

    /// Write a bit; out of range writes are dropped
    pub fn set_bit(&mut self, x: i32, y: i32, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.bits[i] = value;
        }
    }

    /// Set a horizontal run of bits starting at `(x, y)`
    pub fn set_row(&mut self, x: i32, y: i32, len: i32) {
        for dx in 0..len.max(0) {
            self.set_bit(x + dx, y, true);
        }
    }

    /// Set a vertical run of bits starting at `(x, y)`
    pub fn set_column(&mut self, x: i32, y: i32, len: i32) {
        for dy in 0..len.max(0) {
            self.set_bit(x, y + dy, true);
        }
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// OR `other` into this grid at `(x, y)`, clipping at every edge
    pub fn add_buffer(&mut self, x: i32, y: i32, other: &BitBuffer) {
        let target = Rect::sized(other.size)
            .translate(x, y)
            .intersect(&Rect::sized(self.size));
        for dy in target.top()..target.bottom() {
            for dx in target.left()..target.right() {
                if other.get_bit(dx - x, dy - y) {
                    self.set_bit(dx, dy, true);
                }
            }
        }
    }

    /// Neighbour code of a position: up = 8, down = 4, left = 2, right = 1
    pub fn neighbour_code(&self, x: i32, y: i32) -> usize {
        let mut code = 0;
        if self.get_bit(x, y - 1) {
            code |= GlyphTable::UP;
        }
        if self.get_bit(x, y + 1) {
            code |= GlyphTable::DOWN;
        }
        if self.get_bit(x - 1, y) {
            code |= GlyphTable::LEFT;
        }
        if self.get_bit(x + 1, y) {
            code |= GlyphTable::RIGHT;
        }
        code
    }

    /// Convert every set bit into the glyph for its neighbour code.
    ///
    /// Unset positions stay transparent in the resulting buffer.
    pub fn to_buffer(&self, glyphs: &GlyphTable, style: Style) -> Buffer {
        let mut buffer = Buffer::new(self.size.width, self.size.height);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                if self.get_bit(x, y) {
                    let glyph = glyphs.glyph(self.neighbour_code(x, y));
                    buffer.set_char(x, y, Some(glyph), Some(style));
                }
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RenderMode;

    fn plain(bits: &BitBuffer) -> String {
        bits.to_buffer(&GlyphTable::LIGHT, Style::new())
            .render(RenderMode::Plain, ' ', Style::new())
    }

    #[test]
    fn test_bits_out_of_range() {
        let mut bits = BitBuffer::new(2, 2);
        bits.set_bit(-1, 0, true);
        bits.set_bit(2, 1, true);
        assert_eq!(bits.count(), 0);
        assert!(!bits.get_bit(5, 5));
        assert!(!bits.get_bit(-1, -1));
    }

    #[test]
    fn test_isolated_bit_uses_index_zero() {
        let mut bits = BitBuffer::new(3, 3);
        bits.set_bit(1, 1, true);
        let buffer = bits.to_buffer(&GlyphTable::LIGHT, Style::new());
        assert_eq!(buffer.get(1, 1).and_then(|c| c.ch), Some('·'));
        assert_eq!(buffer.get(0, 0).and_then(|c| c.ch), None);
    }

    #[test]
    fn test_cross_uses_index_fifteen() {
        let mut bits = BitBuffer::new(3, 3);
        bits.set_row(0, 1, 3);
        bits.set_column(1, 0, 3);
        assert_eq!(bits.neighbour_code(1, 1), 15);
        assert_eq!(plain(&bits), " ╷ \n╶┼╴\n ╵ ");
    }

    #[test]
    fn test_rectangle_outline() {
        let mut bits = BitBuffer::new(4, 3);
        bits.set_row(0, 0, 4);
        bits.set_row(0, 2, 4);
        bits.set_column(0, 0, 3);
        bits.set_column(3, 0, 3);
        assert_eq!(plain(&bits), "┌──┐\n│  │\n└──┘");
    }

    #[test]
    fn test_or_composite_is_order_independent() {
        let mut horizontal = BitBuffer::new(5, 1);
        horizontal.set_row(0, 0, 5);
        let mut vertical = BitBuffer::new(1, 3);
        vertical.set_column(0, 0, 3);

        let mut a = BitBuffer::new(5, 3);
        a.add_buffer(0, 1, &horizontal);
        a.add_buffer(2, 0, &vertical);

        let mut b = BitBuffer::new(5, 3);
        b.add_buffer(2, 0, &vertical);
        b.add_buffer(0, 1, &horizontal);

        assert_eq!(a, b);
        assert_eq!(plain(&a), plain(&b));
        assert_eq!(plain(&a), "  ╷  \n╶─┼─╴\n  ╵  ");
    }

    #[test]
    fn test_add_buffer_only_copies_true_bits() {
        let mut target = BitBuffer::new(3, 1);
        target.set_row(0, 0, 3);
        let source = BitBuffer::new(3, 1);
        target.add_buffer(0, 0, &source);
        assert_eq!(target.count(), 3);

        let mut clipped = BitBuffer::new(2, 2);
        let mut big = BitBuffer::new(3, 3);
        big.set_bit(0, 0, true);
        big.set_bit(2, 2, true);
        clipped.add_buffer(-1, -1, &big);
        assert!(clipped.get_bit(1, 1));
        assert_eq!(clipped.count(), 1);
    }

    #[test]
    fn test_add_buffer_at_extreme_offsets() {
        let mut line = BitBuffer::new(2, 1);
        line.set_row(0, 0, 2);
        let mut target = BitBuffer::new(3, 2);

        target.add_buffer(i32::MAX, 0, &line);
        target.add_buffer(0, i32::MAX, &line);
        target.add_buffer(i32::MIN, i32::MIN, &line);
        target.add_buffer(i32::MAX - 1, i32::MIN + 1, &line);
        assert_eq!(target.count(), 0);

        target.add_buffer(2, 1, &line);
        assert!(target.get_bit(2, 1));
        assert_eq!(target.count(), 1);
    }
}
