//! Styling system for terminal text

mod color;
mod style;

pub use color::Color;
pub use style::{Intensity, Style};
