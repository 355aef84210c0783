//! Pressable button

use super::{display_width, Selectable, SelectionState};
use crate::buffer::Buffer;
use crate::element::{Element, ElementCore, Observers};
use crate::event::{KeyBindings, KeyCode, KeyEvent};
use crate::style::Style;
use std::fmt;

/// A bracketed caption that fires its press observers on Enter.
///
/// Drawn with inverted colours while focused.
pub struct Button {
    core: ElementCore,
    selection: SelectionState,
    text: String,
    style: Style,
    pressed: Observers<()>,
    keys: KeyBindings<Button>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let mut keys = KeyBindings::new();
        keys.bind(KeyCode::Enter, |button: &mut Button, _| {
            button.press();
            true
        });
        Self {
            core: ElementCore::new(),
            selection: SelectionState::new(),
            text: text.into(),
            style: Style::default(),
            pressed: Observers::new(),
            keys,
        }
    }

    /// Builder: set the caption style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.core.mark_dirty();
    }

    /// Register a press observer
    pub fn on_press<F>(&mut self, mut callback: F)
    where
        F: FnMut() + 'static,
    {
        self.pressed.subscribe(move |_| callback());
    }

    /// Fire the press observers
    pub fn press(&mut self) {
        self.pressed.notify(&());
    }

    pub fn keys_mut(&mut self) -> &mut KeyBindings<Button> {
        &mut self.keys
    }
}

impl Element for Button {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let caption = format!("[{}]", self.text);
        let style = if self.is_selected() {
            self.style.inverted()
        } else {
            self.style
        };
        let mut buffer = Buffer::new(display_width(&caption), 1);
        buffer.set_string(0, 0, &caption, Some(style));
        buffer
    }

    fn kind(&self) -> &'static str {
        "button"
    }
}

impl Selectable for Button {
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
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("selected", &self.is_selected())
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}
