//! Focus and text-entry capabilities plus the stock elements built on them

mod button;
mod checkbox;
mod label;
mod line;
mod selectable;
mod text_box;
mod writable;

pub use button::Button;
pub use checkbox::Checkbox;
pub use label::Label;
pub use line::{Line, LineShape};
pub use selectable::{Selectable, SelectableRef, SelectionState};
pub use text_box::{FrameChars, TextBox};
pub use writable::{writable_bindings, TextEntry, Writable};

use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells
pub(crate) fn display_width(text: &str) -> i32 {
    i32::try_from(text.width()).unwrap_or(i32::MAX)
}
