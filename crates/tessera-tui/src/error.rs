//! Engine error types

use thiserror::Error;

/// Errors raised by the engine.
///
/// Buffer reads and writes never produce these; out-of-range access is
/// clipped instead. Errors are reserved for construction-time contract
/// violations and terminal I/O.
#[derive(Error, Debug)]
pub enum TuiError {
    /// A connected-line glyph table needs one glyph per neighbour code
    #[error("Glyph table must have 16 entries, got {len}")]
    InvalidGlyphTable { len: usize },

    /// A frame table needs one character per edge and corner
    #[error("Frame table must have 8 entries, got {len}")]
    InvalidFrameTable { len: usize },

    /// Text handed to a writable is longer than its capacity
    #[error("Text of length {len} exceeds capacity {capacity}")]
    TextExceedsCapacity { len: usize, capacity: usize },

    /// A color spelled neither as a name, `#rrggbb` nor a palette index
    #[error("Invalid color {value:?}: expected a color name, #rrggbb or 0-255")]
    InvalidColor { value: String },

    /// Terminal sink failure
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, TuiError>;
