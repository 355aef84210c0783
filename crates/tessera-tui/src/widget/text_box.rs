//! Framed single-line text entry

use super::{writable_bindings, Selectable, SelectionState, TextEntry, Writable};
use crate::buffer::Buffer;
use crate::element::{Element, ElementCore};
use crate::error::{Result, TuiError};
use crate::event::{KeyBindings, KeyEvent};
use crate::geometry::{Point, Size};
use crate::style::Style;
use std::fmt;

/// Characters for a frame, in the order
/// top-left, top, top-right, left, right, bottom-left, bottom, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameChars([char; 8]);

impl FrameChars {
    /// Single line border (─ │ ┌ ┐ └ ┘)
    pub const SINGLE: FrameChars = FrameChars(['┌', '─', '┐', '│', '│', '└', '─', '┘']);
    /// Double line border (═ ║ ╔ ╗ ╚ ╝)
    pub const DOUBLE: FrameChars = FrameChars(['╔', '═', '╗', '║', '║', '╚', '═', '╝']);
    /// Rounded corners (─ │ ╭ ╮ ╰ ╯)
    pub const ROUNDED: FrameChars = FrameChars(['╭', '─', '╮', '│', '│', '╰', '─', '╯']);
    /// Heavy/thick border (━ ┃ ┏ ┓ ┗ ┛)
    pub const HEAVY: FrameChars = FrameChars(['┏', '━', '┓', '┃', '┃', '┗', '━', '┛']);

    /// Build a frame from exactly eight characters
    pub fn new(chars: &[char]) -> Result<Self> {
        let table: [char; 8] = chars
            .try_into()
            .map_err(|_| TuiError::InvalidFrameTable { len: chars.len() })?;
        Ok(Self(table))
    }

    pub fn top_left(&self) -> char {
        self.0[0]
    }

    pub fn top(&self) -> char {
        self.0[1]
    }

    pub fn top_right(&self) -> char {
        self.0[2]
    }

    pub fn left(&self) -> char {
        self.0[3]
    }

    pub fn right(&self) -> char {
        self.0[4]
    }

    pub fn bottom_left(&self) -> char {
        self.0[5]
    }

    pub fn bottom(&self) -> char {
        self.0[6]
    }

    pub fn bottom_right(&self) -> char {
        self.0[7]
    }
}

impl Default for FrameChars {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// A writable text field inside a one-cell frame.
///
/// The field is as wide as the entry's capacity unless it stretches, in which
/// case it tracks the width of its parent screen. Text longer than the field
/// shows its tail. The frame is drawn bold while focused.
pub struct TextBox {
    core: ElementCore,
    selection: SelectionState,
    entry: TextEntry,
    frame: FrameChars,
    style: Style,
    field_width: i32,
    stretch: bool,
    keys: KeyBindings<TextBox>,
}

impl TextBox {
    /// Widest field a text box draws; longer text scrolls inside it
    pub const MAX_FIELD_WIDTH: i32 = 4096;

    /// Fails when `text` is longer than `capacity`
    pub fn new(text: impl Into<String>, capacity: usize) -> Result<Self> {
        Ok(Self::from_entry(TextEntry::new(text, capacity)?))
    }

    /// Wrap an entry built elsewhere, for instance one with a policy
    pub fn from_entry(entry: TextEntry) -> Self {
        let field_width = i32::try_from(entry.capacity())
            .unwrap_or(i32::MAX)
            .min(Self::MAX_FIELD_WIDTH);
        Self {
            core: ElementCore::new(),
            selection: SelectionState::new(),
            entry,
            frame: FrameChars::default(),
            style: Style::default(),
            field_width,
            stretch: false,
            keys: writable_bindings(),
        }
    }

    /// Builder: frame characters
    pub fn frame(mut self, frame: FrameChars) -> Self {
        self.frame = frame;
        self
    }

    /// Builder: style for frame and text
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Builder: widen the field to the parent's width on resize
    pub fn stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn field_width(&self) -> i32 {
        self.field_width
    }

    pub fn keys_mut(&mut self) -> &mut KeyBindings<TextBox> {
        &mut self.keys
    }

    /// The part of the text that fits the field
    fn visible(&self) -> &str {
        let len = self.entry.len();
        let width = usize::try_from(self.field_width).unwrap_or(0);
        let skip = len.saturating_sub(width);
        match self.entry.text().char_indices().nth(skip) {
            Some((start, _)) => &self.entry.text()[start..],
            None => "",
        }
    }
}

impl Element for TextBox {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let width = self.field_width.saturating_add(2);
        let mut buffer = Buffer::new(width, 3);
        let frame_style = if self.is_selected() {
            self.style.bold()
        } else {
            self.style
        };
        let frame = self.frame;
        let border = Some(frame_style);
        let right = width - 1;

        buffer.set_char(0, 0, Some(frame.top_left()), border);
        buffer.set_char(right, 0, Some(frame.top_right()), border);
        buffer.set_char(0, 2, Some(frame.bottom_left()), border);
        buffer.set_char(right, 2, Some(frame.bottom_right()), border);
        for x in 1..right {
            buffer.set_char(x, 0, Some(frame.top()), border);
            buffer.set_char(x, 2, Some(frame.bottom()), border);
            buffer.set_char(x, 1, Some(' '), Some(self.style));
        }
        buffer.set_char(0, 1, Some(frame.left()), border);
        buffer.set_char(right, 1, Some(frame.right()), border);

        let visible = self.visible().to_owned();
        buffer.set_string(1, 1, &visible, Some(self.style));
        buffer
    }

    fn kind(&self) -> &'static str {
        "text_box"
    }

    fn on_parent_resize(&mut self, size: Size) {
        if !self.stretch {
            return;
        }
        let width = size
            .width
            .saturating_sub(self.core.offset().x)
            .saturating_sub(2)
            .clamp(0, Self::MAX_FIELD_WIDTH);
        if width != self.field_width {
            self.field_width = width;
            self.core.mark_dirty();
        }
    }
}

impl Selectable for TextBox {
    fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self.keys.handler(key) {
            Some(handler) => handler(self, key),
            None => false,
        }
    }

    fn cursor(&self) -> Option<Point> {
        let shown = i32::try_from(self.visible().chars().count()).unwrap_or(i32::MAX);
        Some(Point::new(1 + shown, 1))
    }
}

impl Writable for TextBox {
    fn entry(&self) -> &TextEntry {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut TextEntry {
        &mut self.entry
    }
}

impl fmt::Debug for TextBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBox")
            .field("entry", &self.entry)
            .field("frame", &self.frame)
            .field("field_width", &self.field_width)
            .field("stretch", &self.stretch)
            .finish_non_exhaustive()
    }
}
