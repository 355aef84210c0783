//! Screens with a focus pointer, key dispatch and an optional scrolling viewport

use super::play::present_frame;
use super::{Direction, PlaySettings, Playable, Screen, SelectionMatrix, StopHandle};
use crate::buffer::Buffer;
use crate::config::TuiConfig;
use crate::element::{Element, ElementCore, ElementRef, Observers};
use crate::error::Result;
use crate::event::{KeyBindings, KeyCode, KeyEvent};
use crate::geometry::{Point, Size};
use crate::terminal::TerminalSink;
use crate::widget::{Selectable, SelectableRef};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Whether the viewport follows the focused element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    #[default]
    Static,
    /// Shift the scroll offset so the focused element stays visible
    FollowFocus,
}

/// A screen whose focusable children sit in a [`SelectionMatrix`].
///
/// Exactly one matrix cell is focused while the matrix holds anything. Keys
/// go to the focused element first, then to this screen's own table, which
/// starts with arrow-key navigation and Escape to stop.
pub struct InteractiveScreen {
    screen: Screen,
    matrix: SelectionMatrix,
    pointer: Option<Point>,
    keys: KeyBindings<InteractiveScreen>,
    scroll_mode: ScrollMode,
    /// Size the viewport was last corrected for
    viewport: Size,
    stop: StopHandle,
    cycle_end: Observers<StopHandle>,
    settings: PlaySettings,
}

impl InteractiveScreen {
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_screen(Screen::new(width, height))
    }

    /// An interactive screen whose viewport follows focus
    pub fn scrolling(width: i32, height: i32) -> Self {
        let mut screen = Self::new(width, height);
        screen.scroll_mode = ScrollMode::FollowFocus;
        screen
    }

    /// Wrap an existing screen, keeping its children as plain content
    pub fn from_screen(screen: Screen) -> Self {
        let viewport = screen.size();
        Self {
            screen,
            matrix: SelectionMatrix::new(),
            pointer: None,
            keys: default_bindings(),
            scroll_mode: ScrollMode::Static,
            viewport,
            stop: StopHandle::new(),
            cycle_end: Observers::new(),
            settings: PlaySettings::default(),
        }
    }

    /// The underlying screen, for plain children, size and style
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Add non-focusable content
    pub fn add(&mut self, element: ElementRef) -> bool {
        self.screen.add(element)
    }

    /// Add content that ignores scrolling
    pub fn add_fixed(&mut self, element: ElementRef) -> bool {
        self.screen.add_fixed(element)
    }

    /// Add a focusable element at matrix cell `(x, y)`.
    ///
    /// The element is also composited as a child. An element already in the
    /// matrix moves to the new cell; one previously held by the cell is
    /// detached. The first element added takes focus.
    pub fn add_selectable<S>(&mut self, node: Rc<RefCell<S>>, x: i32, y: i32) -> bool
    where
        S: Selectable + 'static,
    {
        if !SelectionMatrix::accepts(x, y) {
            debug!(x, y, "selectable cell rejected");
            return false;
        }
        let selectable: SelectableRef = node.clone();
        let target = Point::new(x, y);

        let mut keep_focus = false;
        if let Some(old) = self.matrix.position_of(&selectable) {
            self.matrix.take(old.x, old.y);
            if self.pointer == Some(old) {
                self.pointer = None;
                keep_focus = true;
            }
        }
        if let Some(previous) = self.matrix.set(x, y, selectable) {
            previous.borrow_mut().deselect();
            self.screen.remove(&previous);
            if self.pointer == Some(target) {
                self.pointer = None;
            }
        }
        self.screen.add(node);

        if keep_focus {
            self.pointer = Some(target);
            self.follow_focus();
        } else if self.pointer.is_none() {
            self.focus_first();
        }
        true
    }

    /// Remove a focusable element from the matrix and the children.
    ///
    /// Removing the focused element moves focus to the first remaining one.
    pub fn remove_selectable(&mut self, node: &SelectableRef) -> bool {
        let Some(at) = self.matrix.position_of(node) else {
            return false;
        };
        self.matrix.take(at.x, at.y);
        self.screen.remove(node);
        if self.pointer == Some(at) {
            node.borrow_mut().deselect();
            self.pointer = None;
            self.focus_first();
        }
        true
    }

    fn focus_first(&mut self) {
        if let Some(first) = self.matrix.first() {
            self.set_pointer(first.x, first.y);
        }
    }

    pub fn matrix(&self) -> &SelectionMatrix {
        &self.matrix
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// The focused element, if any
    pub fn focused(&self) -> Option<SelectableRef> {
        self.pointer.and_then(|at| self.matrix.get(at.x, at.y))
    }

    /// Move focus to matrix cell `(x, y)`.
    ///
    /// Rejected, returning `false`, when the cell is out of range or empty.
    /// On success the old focus is deselected and the new one selected.
    pub fn set_pointer(&mut self, x: i32, y: i32) -> bool {
        let Some(target) = self.matrix.get(x, y) else {
            debug!(x, y, "pointer move rejected");
            return false;
        };
        let at = Point::new(x, y);
        if self.pointer == Some(at) {
            return true;
        }

        if let Some(current) = self.focused() {
            current.borrow_mut().deselect();
        }
        self.pointer = Some(at);
        target.borrow_mut().select();
        debug!(x, y, "pointer moved");

        self.follow_focus();
        true
    }

    /// Step the pointer one cell in `direction`
    pub fn move_pointer(&mut self, direction: Direction) -> bool {
        let Some(at) = self.pointer else {
            return false;
        };
        let (dx, dy) = direction.delta();
        self.set_pointer(at.x.saturating_add(dx), at.y.saturating_add(dy))
    }

    /// This screen's key table
    pub fn keys(&self) -> &KeyBindings<InteractiveScreen> {
        &self.keys
    }

    /// Mutable key table, for adding or clearing bindings
    pub fn keys_mut(&mut self) -> &mut KeyBindings<InteractiveScreen> {
        &mut self.keys
    }

    /// Offer a key to the focused element, then to this screen's table
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(node) = self.focused() {
            if node.borrow_mut().handle_key(key) {
                return true;
            }
        }
        match self.keys.handler(key) {
            Some(handler) => handler(self, key),
            None => false,
        }
    }

    /// End the play loop after the current iteration
    pub fn stop(&self) {
        debug!("stop requested");
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub(crate) fn set_stop_handle(&mut self, stop: StopHandle) {
        self.stop = stop;
    }

    /// Register an end-of-cycle hook; it receives the loop's stop handle
    pub fn on_cycle_end<F>(&mut self, callback: F)
    where
        F: FnMut(&StopHandle) + 'static,
    {
        self.cycle_end.subscribe(callback);
    }

    pub fn play_settings(&self) -> PlaySettings {
        self.settings
    }

    pub fn set_play_settings(&mut self, settings: PlaySettings) {
        self.settings = settings;
    }

    /// Take play settings, auto-resize and configured colors from a loaded
    /// configuration. A configuration without colors keeps the current
    /// default style.
    pub fn configure(&mut self, config: &TuiConfig) {
        self.settings = config.play_settings();
        self.screen.set_auto_resize(config.screen.auto_resize);
        let style = config.default_style();
        if !style.is_empty() {
            self.screen.set_default_style(style);
        }
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll_mode
    }

    pub fn set_scroll_mode(&mut self, mode: ScrollMode) {
        self.scroll_mode = mode;
        self.follow_focus();
    }

    /// Select the focused element, used when this screen becomes active
    pub fn activate(&mut self) {
        if let Some(node) = self.focused() {
            node.borrow_mut().select();
        }
    }

    /// Deselect the focused element without moving the pointer
    pub fn deactivate(&mut self) {
        if let Some(node) = self.focused() {
            node.borrow_mut().deselect();
        }
    }

    /// Where the focused element wants the terminal cursor, in screen cells
    pub fn cursor_position(&self) -> Option<Point> {
        let node = self.focused()?;
        let node = node.borrow();
        let cursor = node.cursor()?;
        let size = node.core().cached().size();
        let at = node.core().resolve(self.screen.size(), size) - self.screen.scroll();
        Some(at + cursor)
    }

    /// Shift the scroll offset so the focused element is inside the viewport.
    ///
    /// An axis is left alone when the element is larger than the viewport.
    fn follow_focus(&mut self) {
        self.viewport = self.screen.size();
        if self.scroll_mode != ScrollMode::FollowFocus {
            return;
        }
        let Some(node) = self.focused() else {
            return;
        };

        let (position, size) = {
            let mut node = node.borrow_mut();
            let size = node.buffer().size();
            (node.core().resolve(self.viewport, size), size)
        };
        let scroll = self.screen.scroll();
        let start = position - scroll;

        let dx = correction(start.x, size.width, self.viewport.width);
        let dy = correction(start.y, size.height, self.viewport.height);
        if dx != 0 || dy != 0 {
            debug!(dx, dy, "viewport follows focus");
            self.screen
                .set_scroll(scroll.x.saturating_add(dx), scroll.y.saturating_add(dy));
        }
    }
}

/// Minimum shift along one axis bringing `[start, start + len)` into `[0, view)`
fn correction(start: i32, len: i32, view: i32) -> i32 {
    if len > view {
        0
    } else if start < 0 {
        start
    } else if start > view - len {
        start - (view - len)
    } else {
        0
    }
}

fn default_bindings() -> KeyBindings<InteractiveScreen> {
    let mut keys = KeyBindings::new();
    keys.bind(KeyCode::Up, |screen: &mut InteractiveScreen, _| {
        screen.move_pointer(Direction::Up)
    });
    keys.bind(KeyCode::Down, |screen: &mut InteractiveScreen, _| {
        screen.move_pointer(Direction::Down)
    });
    keys.bind(KeyCode::Left, |screen: &mut InteractiveScreen, _| {
        screen.move_pointer(Direction::Left)
    });
    keys.bind(KeyCode::Right, |screen: &mut InteractiveScreen, _| {
        screen.move_pointer(Direction::Right)
    });
    keys.bind(KeyCode::Esc, |screen: &mut InteractiveScreen, _| {
        screen.stop();
        true
    });
    keys
}

impl Element for InteractiveScreen {
    fn core(&self) -> &ElementCore {
        self.screen.core()
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        self.screen.core_mut()
    }

    fn generate_buffer(&mut self) -> Buffer {
        self.screen.generate_buffer()
    }

    fn kind(&self) -> &'static str {
        "interactive_screen"
    }

    fn child_needs_recomposite(&self) -> bool {
        self.screen.child_needs_recomposite()
    }

    fn mark_children_clean(&mut self) {
        self.screen.mark_children_clean();
    }

    fn on_parent_resize(&mut self, size: Size) {
        self.screen.on_parent_resize(size);
    }

    fn refresh(&mut self) {
        self.screen.refresh();
        if self.screen.size() != self.viewport {
            self.follow_focus();
        }
    }
}

impl Playable for InteractiveScreen {
    fn play_settings(&self) -> PlaySettings {
        self.settings
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn present(&mut self, sink: &mut dyn TerminalSink) -> Result<()> {
        let frame = self.buffer();
        present_frame(&frame, self.settings, self.cursor_position(), sink)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        InteractiveScreen::handle_key(self, key)
    }

    fn end_cycle(&mut self) {
        let stop = self.stop.clone();
        self.cycle_end.notify(&stop);
    }
}

impl fmt::Debug for InteractiveScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveScreen")
            .field("screen", &self.screen)
            .field("matrix", &self.matrix)
            .field("pointer", &self.pointer)
            .field("scroll_mode", &self.scroll_mode)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
