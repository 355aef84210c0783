//! Key events and key binding tables

mod keymap;

// Re-export crossterm types with cleaner names
pub use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
pub use keymap::{KeyBinding, KeyBindings, KeyHandler};

/// A key press with no modifiers
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A character key press with no modifiers
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// The character typed by this key, if it is plain text entry.
///
/// Control and Alt chords are commands, not text.
pub fn typed_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(c)
            if !event.modifiers.contains(KeyModifiers::CONTROL)
                && !event.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
