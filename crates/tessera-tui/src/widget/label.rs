//! Static text element

use super::display_width;
use crate::buffer::Buffer;
use crate::element::{Element, ElementCore};
use crate::style::Style;

/// Multi-line text, sized to fit its widest line.
#[derive(Debug, Clone, Default)]
pub struct Label {
    core: ElementCore,
    text: String,
    style: Option<Style>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            core: ElementCore::new(),
            text: text.into(),
            style: None,
        }
    }

    /// Builder: set the text style
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.core.mark_dirty();
        }
    }

    pub fn set_style(&mut self, style: Option<Style>) {
        if self.style != style {
            self.style = style;
            self.core.mark_dirty();
        }
    }
}

impl Element for Label {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let lines: Vec<&str> = self.text.split('\n').collect();
        let width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);
        let mut buffer = Buffer::new(width, i32::try_from(lines.len()).unwrap_or(i32::MAX));
        for (y, line) in lines.iter().enumerate() {
            buffer.set_string(0, y as i32, line, self.style);
        }
        buffer
    }

    fn kind(&self) -> &'static str {
        "label"
    }
}
