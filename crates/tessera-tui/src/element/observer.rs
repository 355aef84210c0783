//! Observer lists for resize, selection and similar notifications

use std::fmt;

type Callback<E> = Box<dyn FnMut(&E)>;

/// An ordered list of callbacks notified with a shared event value.
pub struct Observers<E> {
    callbacks: Vec<Callback<E>>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback; callbacks run in registration order
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&E) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Call every registered callback with `event`
    pub fn notify(&mut self, event: &E) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }

    /// Remove every callback
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
