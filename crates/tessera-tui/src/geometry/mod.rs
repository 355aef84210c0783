//! Geometry primitives for terminal positioning and sizing

mod placement;
mod point;
mod rect;
mod size;

pub use placement::Placement;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
