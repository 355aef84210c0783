//! Connected-line glyph tables

use crate::error::{Result, TuiError};

/// Sixteen glyphs indexed by a neighbour code.
///
/// The code of a set bit is the sum of its set neighbours:
/// up = 8, down = 4, left = 2, right = 1. Index 0 is an isolated point and
/// index 15 a four-way junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphTable([char; 16]);

impl GlyphTable {
    pub const UP: usize = 8;
    pub const DOWN: usize = 4;
    pub const LEFT: usize = 2;
    pub const RIGHT: usize = 1;

    /// Single-line box drawing
    pub const LIGHT: GlyphTable = GlyphTable([
        '·', '╶', '╴', '─', '╷', '┌', '┐', '┬', '╵', '└', '┘', '┴', '│', '├', '┤', '┼',
    ]);

    /// Heavy box drawing
    pub const HEAVY: GlyphTable = GlyphTable([
        '•', '╺', '╸', '━', '╻', '┏', '┓', '┳', '╹', '┗', '┛', '┻', '┃', '┣', '┫', '╋',
    ]);

    /// Double-line box drawing; there are no double half-lines, so line ends
    /// use the full segment
    pub const DOUBLE: GlyphTable = GlyphTable([
        '·', '═', '═', '═', '║', '╔', '╗', '╦', '║', '╚', '╝', '╩', '║', '╠', '╣', '╬',
    ]);

    /// Single lines with rounded corners
    pub const ROUNDED: GlyphTable = GlyphTable([
        '·', '╶', '╴', '─', '╷', '╭', '╮', '┬', '╵', '╰', '╯', '┴', '│', '├', '┤', '┼',
    ]);

    /// Build a table from exactly sixteen glyphs
    pub fn new(glyphs: &[char]) -> Result<Self> {
        let table: [char; 16] = glyphs
            .try_into()
            .map_err(|_| TuiError::InvalidGlyphTable { len: glyphs.len() })?;
        Ok(Self(table))
    }

    /// Glyph for a neighbour code; only the low four bits are used
    pub fn glyph(&self, code: usize) -> char {
        self.0[code & 0xF]
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_table_requires_sixteen() {
        let short: Vec<char> = "┼┼┼".chars().collect();
        let err = GlyphTable::new(&short).unwrap_err();
        assert!(matches!(err, TuiError::InvalidGlyphTable { len: 3 }));

        let exact: Vec<char> = "0123456789abcdef".chars().collect();
        let table = GlyphTable::new(&exact).unwrap();
        assert_eq!(table.glyph(10), 'a');
    }

    #[test]
    fn test_light_table_order() {
        let t = GlyphTable::LIGHT;
        assert_eq!(t.glyph(0), '·');
        assert_eq!(t.glyph(GlyphTable::LEFT | GlyphTable::RIGHT), '─');
        assert_eq!(t.glyph(GlyphTable::UP | GlyphTable::DOWN), '│');
        assert_eq!(t.glyph(GlyphTable::DOWN | GlyphTable::RIGHT), '┌');
        assert_eq!(t.glyph(GlyphTable::UP | GlyphTable::LEFT), '┘');
        assert_eq!(t.glyph(15), '┼');
    }
}
