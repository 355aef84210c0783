//! Bounded text entry layered on selectable elements

use super::Selectable;
use crate::error::{Result, TuiError};
use crate::event::{typed_char, KeyBindings, KeyCode};
use std::fmt;

type AcceptFn = Box<dyn Fn(char) -> bool>;

/// Text limited to `capacity` characters, filtered by an acceptance policy.
///
/// The cursor always sits at the end of the text.
pub struct TextEntry {
    text: String,
    capacity: usize,
    accept: AcceptFn,
}

impl TextEntry {
    /// Create an entry accepting any character.
    ///
    /// Fails when `text` is longer than `capacity`.
    pub fn new(text: impl Into<String>, capacity: usize) -> Result<Self> {
        let text = text.into();
        check_capacity(&text, capacity)?;
        Ok(Self {
            text,
            capacity,
            accept: Box::new(|_| true),
        })
    }

    /// Builder: restrict which characters may be typed
    pub fn accepting<F>(mut self, policy: F) -> Self
    where
        F: Fn(char) -> bool + 'static,
    {
        self.accept = Box::new(policy);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Replace the whole text, subject to the same capacity rule as `new`
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        check_capacity(&text, self.capacity)?;
        self.text = text;
        Ok(())
    }

    /// Append a character; `false` when full or rejected by the policy
    pub fn add_char(&mut self, c: char) -> bool {
        if self.is_full() || !(self.accept)(c) {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Remove the last character. Always succeeds, even on empty text.
    pub fn del_char(&mut self) -> bool {
        self.text.pop();
        true
    }

    /// Cursor column, one past the last character
    pub fn cursor(&self) -> i32 {
        i32::try_from(self.len()).unwrap_or(i32::MAX)
    }
}

fn check_capacity(text: &str, capacity: usize) -> Result<()> {
    let len = text.chars().count();
    if len > capacity {
        return Err(TuiError::TextExceedsCapacity { len, capacity });
    }
    Ok(())
}

impl fmt::Debug for TextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEntry")
            .field("text", &self.text)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// A selectable element that accepts typed text.
pub trait Writable: Selectable {
    fn entry(&self) -> &TextEntry;

    fn entry_mut(&mut self) -> &mut TextEntry;

    fn text(&self) -> &str {
        self.entry().text()
    }

    /// Append a character, marking the element dirty when it was accepted
    fn add_char(&mut self, c: char) -> bool {
        let added = self.entry_mut().add_char(c);
        if added {
            self.core_mut().mark_dirty();
        }
        added
    }

    fn del_char(&mut self) -> bool {
        if !self.entry().is_empty() {
            self.core_mut().mark_dirty();
        }
        self.entry_mut().del_char()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.entry_mut().set_text(text)?;
        self.core_mut().mark_dirty();
        Ok(())
    }
}

/// Default bindings for writables: Backspace deletes, printable keys append.
///
/// A typed character is consumed even when the entry rejects it, so it never
/// falls through to screen navigation.
pub fn writable_bindings<T: Writable + 'static>() -> KeyBindings<T> {
    let mut keys = KeyBindings::new();
    keys.bind(KeyCode::Backspace, |target: &mut T, _| target.del_char());
    keys.set_fallback(|target: &mut T, key| match typed_char(key) {
        Some(c) => {
            target.add_char(c);
            true
        }
        None => false,
    });
    keys
}
