//! Screens: elements that composite other elements
//!
//! [`Screen`] is the plain container. [`InteractiveScreen`] adds focus,
//! key dispatch and the play loop; [`ConnectedLinesScreen`] joins line
//! elements into box-drawing glyphs; [`ScreenSwitcher`] hosts one active
//! interactive screen at a time.

mod interactive;
mod lines;
mod matrix;
mod play;
mod switcher;

pub use interactive::{InteractiveScreen, ScrollMode};
pub use lines::ConnectedLinesScreen;
pub use matrix::{Direction, SelectionMatrix};
pub use play::{PlaySettings, Playable, StopHandle};
pub use switcher::{ScreenRef, ScreenSwitcher};

use crate::buffer::Buffer;
use crate::element::{same_node, Element, ElementCore, ElementRef, Observers};
use crate::geometry::{Point, Size};
use crate::style::Style;
use crate::terminal::query_terminal_size;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Source of the terminal size used by auto-resize
pub type SizeSource = Box<dyn Fn() -> Option<Size>>;

struct Child {
    element: ElementRef,
    /// Fixed children ignore the scroll offset
    fixed: bool,
}

/// An element that composites an ordered list of children.
///
/// Later children overwrite earlier ones where they overlap. Each child is
/// held once; adding the same handle again is ignored.
pub struct Screen {
    core: ElementCore,
    size: Size,
    children: Vec<Child>,
    default_style: Style,
    scroll: Point,
    auto_resize: bool,
    size_source: SizeSource,
    resized: Observers<Size>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            core: ElementCore::new(),
            size: Size::new(width, height),
            children: Vec::new(),
            default_style: Style::default(),
            scroll: Point::origin(),
            auto_resize: false,
            size_source: Box::new(query_terminal_size),
            resized: Observers::new(),
        }
    }

    /// A screen that follows the terminal size
    pub fn fullscreen() -> Self {
        let size = query_terminal_size().unwrap_or(Size::new(80, 24));
        let mut screen = Self::new(size.width, size.height);
        screen.auto_resize = true;
        screen
    }

    /// Append a child; returns `false` if it was already present
    pub fn add(&mut self, element: ElementRef) -> bool {
        self.insert(element, false)
    }

    /// Append a child that stays put when the screen scrolls
    pub fn add_fixed(&mut self, element: ElementRef) -> bool {
        self.insert(element, true)
    }

    fn insert(&mut self, element: ElementRef, fixed: bool) -> bool {
        if self.contains(&element) {
            return false;
        }
        element.borrow_mut().on_parent_resize(self.size);
        self.children.push(Child { element, fixed });
        self.core.mark_dirty();
        true
    }

    /// Detach a child by identity; returns `false` if it was not present
    pub fn remove<T: ?Sized>(&mut self, element: &Rc<RefCell<T>>) -> bool {
        let before = self.children.len();
        self.children
            .retain(|child| !same_node(&child.element, element));
        let removed = self.children.len() != before;
        if removed {
            self.core.mark_dirty();
        }
        removed
    }

    pub fn contains<T: ?Sized>(&self, element: &Rc<RefCell<T>>) -> bool {
        self.children
            .iter()
            .any(|child| same_node(&child.element, element))
    }

    pub fn clear(&mut self) {
        if !self.children.is_empty() {
            self.children.clear();
            self.core.mark_dirty();
        }
    }

    /// Children in composition order
    pub fn children(&self) -> impl Iterator<Item = &ElementRef> {
        self.children.iter().map(|child| &child.element)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the screen, notifying resize observers and every child
    pub fn set_size(&mut self, width: i32, height: i32) {
        let size = Size::new(width, height);
        if size == self.size {
            return;
        }
        debug!(width = size.width, height = size.height, "screen resized");
        self.size = size;
        self.core.mark_dirty();
        self.resized.notify(&size);
        for child in &self.children {
            child.element.borrow_mut().on_parent_resize(size);
        }
    }

    /// Register a resize observer
    pub fn on_resize<F>(&mut self, callback: F)
    where
        F: FnMut(&Size) + 'static,
    {
        self.resized.subscribe(callback);
    }

    pub fn default_style(&self) -> Style {
        self.default_style
    }

    /// Style given to every cell left unstyled after compositing
    pub fn set_default_style(&mut self, style: Style) {
        if self.default_style != style {
            self.default_style = style;
            self.core.mark_dirty();
        }
    }

    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    pub fn set_auto_resize(&mut self, enabled: bool) {
        self.auto_resize = enabled;
    }

    /// Replace the terminal size query used by auto-resize
    pub fn set_size_source<F>(&mut self, source: F)
    where
        F: Fn() -> Option<Size> + 'static,
    {
        self.size_source = Box::new(source);
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Offset subtracted from the position of every non-fixed child
    pub fn set_scroll(&mut self, x: i32, y: i32) {
        let scroll = Point::new(x, y);
        if self.scroll != scroll {
            self.scroll = scroll;
            self.core.mark_dirty();
        }
    }

    /// Composite every child onto `canvas` and apply the default style
    pub fn compose(&mut self, canvas: &mut Buffer) {
        for child in &self.children {
            let mut element = child.element.borrow_mut();
            let buffer = element.buffer();
            let mut at = element.core().resolve(self.size, buffer.size());
            if !child.fixed {
                at = at - self.scroll;
            }
            canvas.add_buffer(at.x, at.y, &buffer);
        }
        canvas.replace_null_style(self.default_style);
    }

    /// Apply the terminal size when auto-resize is on; no answer keeps the size
    fn poll_terminal_size(&mut self) {
        if !self.auto_resize {
            return;
        }
        if let Some(size) = (self.size_source)() {
            self.set_size(size.width, size.height);
        }
    }
}

impl Element for Screen {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let mut canvas = Buffer::new(self.size.width, self.size.height);
        self.compose(&mut canvas);
        canvas
    }

    fn kind(&self) -> &'static str {
        "screen"
    }

    fn child_needs_recomposite(&self) -> bool {
        self.children
            .iter()
            .any(|child| child.element.borrow().needs_recomposite())
    }

    fn mark_children_clean(&mut self) {
        for child in &self.children {
            child.element.borrow_mut().mark_subtree_clean();
        }
    }

    fn refresh(&mut self) {
        self.poll_terminal_size();
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("size", &self.size)
            .field("children", &self.children.len())
            .field("scroll", &self.scroll)
            .field("auto_resize", &self.auto_resize)
            .finish_non_exhaustive()
    }
}
