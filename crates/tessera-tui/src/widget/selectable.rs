//! Focus capability layered on elements

use crate::element::{Element, Observers};
use crate::event::KeyEvent;
use crate::geometry::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a focusable element
pub type SelectableRef = Rc<RefCell<dyn Selectable>>;

/// Selection flag plus the observers told when it flips
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: bool,
    changed: Observers<bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Register a selection-changed observer
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.changed.subscribe(callback);
    }

    /// Update the flag, returning whether it changed
    fn set(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.changed.notify(&selected);
        true
    }
}

/// An element that can take focus in an interactive screen.
pub trait Selectable: Element {
    fn selection(&self) -> &SelectionState;

    fn selection_mut(&mut self) -> &mut SelectionState;

    fn is_selected(&self) -> bool {
        self.selection().is_selected()
    }

    /// Take focus. Repeated calls are ignored.
    fn select(&mut self) {
        if self.selection_mut().set(true) {
            self.core_mut().mark_dirty();
        }
    }

    /// Drop focus. Repeated calls are ignored.
    fn deselect(&mut self) {
        if self.selection_mut().set(false) {
            self.core_mut().mark_dirty();
        }
    }

    /// Offer a key to this element; `true` means it was consumed
    fn handle_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Cursor position inside this element's buffer, if it shows one
    fn cursor(&self) -> Option<Point> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::element::ElementCore;
    use std::cell::Cell;

    #[derive(Default)]
    struct Toggle {
        core: ElementCore,
        selection: SelectionState,
    }

    impl Element for Toggle {
        fn core(&self) -> &ElementCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ElementCore {
            &mut self.core
        }

        fn generate_buffer(&mut self) -> Buffer {
            Buffer::new(1, 1)
        }
    }

    impl Selectable for Toggle {
        fn selection(&self) -> &SelectionState {
            &self.selection
        }

        fn selection_mut(&mut self) -> &mut SelectionState {
            &mut self.selection
        }
    }

    #[test]
    fn test_select_notifies_once() {
        let count = Rc::new(Cell::new(0));
        let mut toggle = Toggle::default();
        let seen = Rc::clone(&count);
        toggle
            .selection_mut()
            .on_change(move |_| seen.set(seen.get() + 1));

        toggle.select();
        toggle.select();
        assert!(toggle.is_selected());
        assert_eq!(count.get(), 1);

        toggle.deselect();
        toggle.deselect();
        assert!(!toggle.is_selected());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_select_marks_dirty() {
        let mut toggle = Toggle::default();
        toggle.buffer();
        assert!(!toggle.core().is_dirty());

        toggle.select();
        assert!(toggle.core().is_dirty());
    }
}
