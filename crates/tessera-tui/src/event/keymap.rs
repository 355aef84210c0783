//! Per-instance key binding tables

use super::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A key plus the modifiers that must accompany it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A binding with no modifiers
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

impl From<&KeyEvent> for KeyBinding {
    fn from(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// Handler invoked with the table's owner; returns whether the key was handled
pub type KeyHandler<T> = Rc<dyn Fn(&mut T, &KeyEvent) -> bool>;

/// Maps key bindings to handlers acting on an owner of type `T`.
///
/// Handlers are reference counted so the owner can clone one out of its own
/// table and then call it with `&mut self`.
pub struct KeyBindings<T: ?Sized> {
    handlers: HashMap<KeyBinding, KeyHandler<T>>,
    fallback: Option<KeyHandler<T>>,
}

impl<T: ?Sized> KeyBindings<T> {
    /// An empty table
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: None,
        }
    }

    /// Bind a key, replacing any previous handler for it
    pub fn bind<B, F>(&mut self, binding: B, handler: F)
    where
        B: Into<KeyBinding>,
        F: Fn(&mut T, &KeyEvent) -> bool + 'static,
    {
        self.handlers.insert(binding.into(), Rc::new(handler));
    }

    /// Remove a binding, returning whether one existed
    pub fn unbind<B: Into<KeyBinding>>(&mut self, binding: B) -> bool {
        self.handlers.remove(&binding.into()).is_some()
    }

    /// Handler consulted when no binding matches
    pub fn set_fallback<F>(&mut self, handler: F)
    where
        F: Fn(&mut T, &KeyEvent) -> bool + 'static,
    {
        self.fallback = Some(Rc::new(handler));
    }

    /// Remove every binding and the fallback
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.fallback = None;
    }

    pub fn contains<B: Into<KeyBinding>>(&self, binding: B) -> bool {
        self.handlers.contains_key(&binding.into())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.fallback.is_none()
    }

    /// The handler for an event: its exact binding, else the fallback
    pub fn handler(&self, event: &KeyEvent) -> Option<KeyHandler<T>> {
        self.handlers
            .get(&KeyBinding::from(event))
            .or(self.fallback.as_ref())
            .cloned()
    }
}

impl<T> KeyBindings<T> {
    /// Look up and run the handler for `event` against `target`
    pub fn dispatch(&self, target: &mut T, event: &KeyEvent) -> bool {
        match self.handler(event) {
            Some(handler) => handler(target, event),
            None => false,
        }
    }
}

impl<T: ?Sized> Default for KeyBindings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for KeyBindings<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for KeyBindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBindings")
            .field("bindings", &self.handlers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{char_key, key};

    #[derive(Default)]
    struct Counter {
        hits: u32,
        typed: String,
    }

    #[test]
    fn test_bind_and_dispatch() {
        let mut keys: KeyBindings<Counter> = KeyBindings::new();
        keys.bind(KeyCode::Enter, |c, _| {
            c.hits += 1;
            true
        });

        let mut counter = Counter::default();
        assert!(keys.dispatch(&mut counter, &key(KeyCode::Enter)));
        assert!(!keys.dispatch(&mut counter, &key(KeyCode::Tab)));
        assert_eq!(counter.hits, 1);
    }

    #[test]
    fn test_modifiers_are_part_of_binding() {
        let mut keys: KeyBindings<Counter> = KeyBindings::new();
        keys.bind(
            KeyBinding::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            |c, _| {
                c.hits += 10;
                true
            },
        );

        let mut counter = Counter::default();
        assert!(!keys.dispatch(&mut counter, &char_key('s')));
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(keys.dispatch(&mut counter, &ctrl_s));
        assert_eq!(counter.hits, 10);
    }

    #[test]
    fn test_fallback_and_clear() {
        let mut keys: KeyBindings<Counter> = KeyBindings::new();
        keys.set_fallback(|c, event| match event.code {
            KeyCode::Char(ch) => {
                c.typed.push(ch);
                true
            }
            _ => false,
        });

        let mut counter = Counter::default();
        assert!(keys.dispatch(&mut counter, &char_key('h')));
        assert!(keys.dispatch(&mut counter, &char_key('i')));
        assert_eq!(counter.typed, "hi");

        keys.clear();
        assert!(keys.is_empty());
        assert!(!keys.dispatch(&mut counter, &char_key('!')));
    }

    #[test]
    fn test_unbind() {
        let mut keys: KeyBindings<Counter> = KeyBindings::new();
        keys.bind(KeyCode::Esc, |_, _| true);
        assert!(keys.contains(KeyCode::Esc));
        assert!(keys.unbind(KeyCode::Esc));
        assert!(!keys.unbind(KeyCode::Esc));
        assert_eq!(keys.len(), 0);
    }
}
