//! Cell buffers, line bitmasks and connected-line glyph tables

mod bits;
mod buffer;
mod cell;
mod glyphs;

pub use bits::BitBuffer;
pub use buffer::{Buffer, RenderMode};
pub use cell::Cell;
pub use glyphs::GlyphTable;
