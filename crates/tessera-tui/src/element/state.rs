//! Per-element position, placement, dirty flags and buffer cache

use crate::buffer::Buffer;
use crate::geometry::{Placement, Point, Size};
use std::rc::Rc;

/// State every element carries.
///
/// Two dirty flags drive the cache:
/// - `own_dirty`: the element's generator must run again.
/// - `subtree_dirty`: the parent must recomposite this element even when its
///   own buffer is still valid (it moved, or it produced a buffer the parent
///   has not consumed yet).
#[derive(Debug, Clone)]
pub struct ElementCore {
    offset: Point,
    placement: Placement,
    own_dirty: bool,
    subtree_dirty: bool,
    cache: Rc<Buffer>,
    generation: u64,
}

impl ElementCore {
    /// New core at the origin; dirty until its first buffer is produced
    pub fn new() -> Self {
        Self {
            offset: Point::origin(),
            placement: Placement::TopLeft,
            own_dirty: true,
            subtree_dirty: true,
            cache: Rc::new(Buffer::default()),
            generation: 0,
        }
    }

    /// Builder: set offset
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.offset = Point::new(x, y);
        self
    }

    /// Builder: set placement anchor
    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        let offset = Point::new(x, y);
        if self.offset != offset {
            self.offset = offset;
            self.subtree_dirty = true;
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        if self.placement != placement {
            self.placement = placement;
            self.subtree_dirty = true;
        }
    }

    /// Flag the generator to run on the next buffer access
    pub fn mark_dirty(&mut self) {
        self.own_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.own_dirty
    }

    pub fn is_subtree_dirty(&self) -> bool {
        self.subtree_dirty
    }

    /// How many times the generator has run
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve the element's offset into container coordinates
    pub fn resolve(&self, container: Size, content: Size) -> Point {
        self.placement.resolve(container, content, self.offset)
    }

    /// The last produced buffer
    pub fn cached(&self) -> Rc<Buffer> {
        Rc::clone(&self.cache)
    }

    /// Install a freshly generated buffer.
    ///
    /// The parent has not seen it yet, so `subtree_dirty` is raised.
    pub(crate) fn store(&mut self, buffer: Buffer) {
        self.cache = Rc::new(buffer);
        self.own_dirty = false;
        self.subtree_dirty = true;
        self.generation += 1;
    }

    pub(crate) fn clear_subtree_dirty(&mut self) {
        self.subtree_dirty = false;
    }

    /// Clear both flags for elements consumed without going through their
    /// buffer, such as line masks
    pub(crate) fn consume(&mut self) {
        self.own_dirty = false;
        self.subtree_dirty = false;
    }
}

impl Default for ElementCore {
    fn default() -> Self {
        Self::new()
    }
}
