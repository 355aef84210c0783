//! Element tree: positioned nodes that lazily produce cell buffers
//!
//! Invalidation is pull-based. Setters only flip flags on the element they
//! touch; a container discovers dirty descendants when its buffer is next
//! requested, by asking each child whether it needs regeneration or
//! recompositing.

mod state;
mod observer;

pub use state::ElementCore;
pub use observer::Observers;

use crate::buffer::Buffer;
use crate::geometry::{Placement, Point, Size};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Shared handle to an element in a tree
pub type ElementRef = Rc<RefCell<dyn Element>>;

/// Wrap a value for sharing between a tree and its owner
pub fn shared<T>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}

/// Identity comparison of two handles, ignoring vtable pointers
pub fn same_node<A: ?Sized, B: ?Sized>(a: &Rc<RefCell<A>>, b: &Rc<RefCell<B>>) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// A positioned node that produces a buffer.
///
/// Implementors provide [`Element::generate_buffer`] and access to their
/// [`ElementCore`]; caching and invalidation come from the provided methods.
pub trait Element {
    fn core(&self) -> &ElementCore;

    fn core_mut(&mut self) -> &mut ElementCore;

    /// Produce a fresh buffer for the current state
    fn generate_buffer(&mut self) -> Buffer;

    /// Short name used in logs
    fn kind(&self) -> &'static str {
        "element"
    }

    /// Whether any child requires this element to recomposite
    fn child_needs_recomposite(&self) -> bool {
        false
    }

    /// Clear the recomposite flag of every descendant
    fn mark_children_clean(&mut self) {}

    /// Called when the containing screen changes size
    fn on_parent_resize(&mut self, _size: Size) {}

    /// Hook run before every buffer access
    fn refresh(&mut self) {}

    /// True when the cached buffer is stale
    fn needs_regeneration(&self) -> bool {
        self.core().is_dirty() || self.child_needs_recomposite()
    }

    /// True when a parent holding this element must recomposite
    fn needs_recomposite(&self) -> bool {
        self.core().is_subtree_dirty() || self.needs_regeneration()
    }

    /// The element's buffer, regenerated only when stale.
    ///
    /// Repeated calls without an intervening mutation return the same
    /// snapshot.
    fn buffer(&mut self) -> Rc<Buffer> {
        self.refresh();
        if self.needs_regeneration() {
            let fresh = self.generate_buffer();
            self.mark_children_clean();
            self.core_mut().store(fresh);
            trace!(
                kind = self.kind(),
                generation = self.core().generation(),
                "regenerated buffer"
            );
        }
        self.core().cached()
    }

    /// Clear this element's recomposite flag and those of its descendants
    fn mark_subtree_clean(&mut self) {
        self.core_mut().clear_subtree_dirty();
        self.mark_children_clean();
    }

    /// Builder: set the offset
    fn at(mut self, x: i32, y: i32) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_offset(x, y);
        self
    }

    /// Builder: set the placement anchor
    fn placed(mut self, placement: Placement) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_placement(placement);
        self
    }

    /// Absolute position inside a container of the given size
    fn resolve_position(&mut self, container: Size) -> Point {
        let size = self.buffer().size();
        self.core().resolve(container, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block {
        core: ElementCore,
        width: i32,
    }

    impl Element for Block {
        fn core(&self) -> &ElementCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ElementCore {
            &mut self.core
        }

        fn generate_buffer(&mut self) -> Buffer {
            Buffer::filled(self.width, 1, crate::buffer::Cell::new('#'))
        }
    }

    #[test]
    fn test_buffer_is_cached_until_dirty() {
        let mut block = Block {
            core: ElementCore::new(),
            width: 3,
        };

        let first = block.buffer();
        let second = block.buffer();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(block.core().generation(), 1);

        block.width = 4;
        block.core_mut().mark_dirty();
        let third = block.buffer();
        assert!(!Rc::ptr_eq(&first, &third));
        assert_eq!(third.width(), 4);
        assert_eq!(block.core().generation(), 2);
    }

    #[test]
    fn test_resolve_position_uses_buffer_size() {
        let mut block = Block {
            core: ElementCore::new().placed(Placement::BottomRight),
            width: 2,
        };
        assert_eq!(block.resolve_position(Size::new(10, 4)), Point::new(8, 3));
    }

    #[test]
    fn test_same_node_identity() {
        let a = shared(Block {
            core: ElementCore::new(),
            width: 1,
        });
        let b = shared(Block {
            core: ElementCore::new(),
            width: 1,
        });
        let a_dyn: ElementRef = a.clone();
        assert!(same_node(&a, &a_dyn));
        assert!(!same_node(&a, &b));
    }
}
