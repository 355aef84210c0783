//! Two-state toggle

use super::{display_width, Selectable, SelectionState};
use crate::buffer::Buffer;
use crate::element::{Element, ElementCore, Observers};
use crate::event::{KeyBindings, KeyCode, KeyEvent};
use crate::style::Style;
use std::fmt;

/// `[x] label` / `[ ] label`, toggled with Enter or Space.
pub struct Checkbox {
    core: ElementCore,
    selection: SelectionState,
    label: String,
    checked: bool,
    style: Style,
    toggled: Observers<bool>,
    keys: KeyBindings<Checkbox>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        let mut keys = KeyBindings::new();
        keys.bind(KeyCode::Enter, |checkbox: &mut Checkbox, _| {
            checkbox.toggle();
            true
        });
        keys.bind(KeyCode::Char(' '), |checkbox: &mut Checkbox, _| {
            checkbox.toggle();
            true
        });
        Self {
            core: ElementCore::new(),
            selection: SelectionState::new(),
            label: label.into(),
            checked: false,
            style: Style::default(),
            toggled: Observers::new(),
            keys,
        }
    }

    /// Builder: initial state
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state, notifying observers when it changes
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.core.mark_dirty();
            self.toggled.notify(&checked);
        }
    }

    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    /// Register an observer called with the new state
    pub fn on_toggle<F>(&mut self, callback: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.toggled.subscribe(callback);
    }

    pub fn keys_mut(&mut self) -> &mut KeyBindings<Checkbox> {
        &mut self.keys
    }
}

impl Element for Checkbox {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let mark = if self.checked { 'x' } else { ' ' };
        let text = format!("[{mark}] {}", self.label);
        let style = if self.is_selected() {
            self.style.inverted()
        } else {
            self.style
        };
        let mut buffer = Buffer::new(display_width(&text), 1);
        buffer.set_string(0, 0, &text, Some(style));
        buffer
    }

    fn kind(&self) -> &'static str {
        "checkbox"
    }
}

impl Selectable for Checkbox {
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

impl fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkbox")
            .field("label", &self.label)
            .field("checked", &self.checked)
            .field("selected", &self.is_selected())
            .finish_non_exhaustive()
    }
}
