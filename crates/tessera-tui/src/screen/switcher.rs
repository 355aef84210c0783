//! Coordinator hosting one active interactive screen at a time

use super::play::present_frame;
use super::{InteractiveScreen, PlaySettings, Playable, StopHandle};
use crate::buffer::Buffer;
use crate::config::TuiConfig;
use crate::element::{Element, ElementCore, Observers};
use crate::error::Result;
use crate::event::{KeyBindings, KeyCode, KeyEvent};
use crate::geometry::{Point, Size};
use crate::terminal::TerminalSink;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Shared handle to an interactive screen
pub type ScreenRef = Rc<RefCell<InteractiveScreen>>;

/// Shows zero or one active screen and routes keys to it.
///
/// Keys the active screen leaves unhandled fall through to the switcher's own
/// table, where Escape stops the loop. The active screen shares the
/// switcher's stop handle, so its own Escape binding stops the switcher too.
pub struct ScreenSwitcher {
    core: ElementCore,
    size: Size,
    active: Option<ScreenRef>,
    keys: KeyBindings<ScreenSwitcher>,
    stop: StopHandle,
    cycle_end: Observers<StopHandle>,
    settings: PlaySettings,
}

impl ScreenSwitcher {
    pub fn new(width: i32, height: i32) -> Self {
        let mut keys = KeyBindings::new();
        keys.bind(KeyCode::Esc, |switcher: &mut ScreenSwitcher, _| {
            switcher.stop();
            true
        });
        Self {
            core: ElementCore::new(),
            size: Size::new(width, height),
            active: None,
            keys,
            stop: StopHandle::new(),
            cycle_end: Observers::new(),
            settings: PlaySettings::default(),
        }
    }

    pub fn active(&self) -> Option<ScreenRef> {
        self.active.clone()
    }

    /// Make `screen` the active one, or show nothing with `None`.
    ///
    /// The outgoing screen's focus is deselected and it gets a stop handle
    /// of its own; the incoming one is sized to the switcher, takes the
    /// switcher's stop handle and has its focus selected.
    pub fn set_active(&mut self, screen: Option<ScreenRef>) {
        if let (Some(current), Some(next)) = (&self.active, &screen) {
            if Rc::ptr_eq(current, next) {
                return;
            }
        }

        if let Some(old) = self.active.take() {
            let mut old = old.borrow_mut();
            old.deactivate();
            old.set_stop_handle(StopHandle::new());
        }
        if let Some(new) = &screen {
            let mut new = new.borrow_mut();
            new.screen_mut().set_size(self.size.width, self.size.height);
            new.set_stop_handle(self.stop.clone());
            new.activate();
        }
        debug!(active = screen.is_some(), "active screen switched");
        self.active = screen;
        self.core.mark_dirty();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the switcher and its active screen
    pub fn set_size(&mut self, width: i32, height: i32) {
        let size = Size::new(width, height);
        if size == self.size {
            return;
        }
        self.size = size;
        self.core.mark_dirty();
        if let Some(active) = &self.active {
            active.borrow_mut().screen_mut().set_size(width, height);
        }
    }

    pub fn keys_mut(&mut self) -> &mut KeyBindings<ScreenSwitcher> {
        &mut self.keys
    }

    /// Offer a key to the active screen, then to the switcher's table
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(active) = self.active.clone() {
            if active.borrow_mut().handle_key(key) {
                return true;
            }
        }
        match self.keys.handler(key) {
            Some(handler) => handler(self, key),
            None => false,
        }
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn on_cycle_end<F>(&mut self, callback: F)
    where
        F: FnMut(&StopHandle) + 'static,
    {
        self.cycle_end.subscribe(callback);
    }

    pub fn set_play_settings(&mut self, settings: PlaySettings) {
        self.settings = settings;
    }

    /// Take play settings from a loaded configuration
    pub fn configure(&mut self, config: &TuiConfig) {
        self.settings = config.play_settings();
    }

    fn cursor_position(&self) -> Option<Point> {
        self.active
            .as_ref()
            .and_then(|active| active.borrow().cursor_position())
    }
}

impl Element for ScreenSwitcher {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn generate_buffer(&mut self) -> Buffer {
        let mut canvas = Buffer::new(self.size.width, self.size.height);
        if let Some(active) = &self.active {
            let mut active = active.borrow_mut();
            let frame = active.buffer();
            canvas.add_buffer(0, 0, &frame);
        }
        canvas
    }

    fn kind(&self) -> &'static str {
        "screen_switcher"
    }

    fn child_needs_recomposite(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.borrow().needs_recomposite())
    }

    fn mark_children_clean(&mut self) {
        if let Some(active) = &self.active {
            active.borrow_mut().mark_subtree_clean();
        }
    }

    fn refresh(&mut self) {
        if let Some(active) = &self.active {
            active.borrow_mut().refresh();
        }
    }
}

impl Playable for ScreenSwitcher {
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
        ScreenSwitcher::handle_key(self, key)
    }

    fn end_cycle(&mut self) {
        let stop = self.stop.clone();
        self.cycle_end.notify(&stop);
    }
}

impl fmt::Debug for ScreenSwitcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenSwitcher")
            .field("size", &self.size)
            .field("active", &self.active.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RenderMode;
    use crate::element::shared;
    use crate::event::key;
    use crate::style::Style;
    use crate::widget::{Button, Label, Selectable};

    fn menu(text: &str) -> (ScreenRef, Rc<RefCell<Button>>) {
        let screen = shared(InteractiveScreen::new(1, 1));
        let button = shared(Button::new(text));
        screen.borrow_mut().add_selectable(button.clone(), 0, 0);
        (screen, button)
    }

    #[test]
    fn test_switch_moves_selection() {
        let (first, first_button) = menu("a");
        let (second, second_button) = menu("b");
        let mut switcher = ScreenSwitcher::new(6, 1);

        switcher.set_active(Some(first.clone()));
        assert!(first_button.borrow().is_selected());

        switcher.set_active(Some(second.clone()));
        assert!(!first_button.borrow().is_selected());
        assert!(second_button.borrow().is_selected());
        assert_eq!(first.borrow().pointer(), Some(Point::new(0, 0)));
        assert_eq!(second.borrow().screen().size(), Size::new(6, 1));
    }

    #[test]
    fn test_active_screen_stops_switcher() {
        let (screen, _) = menu("a");
        let mut switcher = ScreenSwitcher::new(4, 1);
        switcher.set_active(Some(screen.clone()));

        assert!(switcher.handle_key(&key(KeyCode::Esc)));
        assert!(switcher.stop_handle().is_stopped());

        switcher.set_active(None);
        assert!(!screen.borrow().stop_handle().same_flag(&switcher.stop_handle()));
    }

    #[test]
    fn test_unhandled_keys_fall_through() {
        let (screen, _) = menu("a");
        screen.borrow_mut().keys_mut().clear();
        let mut switcher = ScreenSwitcher::new(4, 1);
        switcher.set_active(Some(screen));

        assert!(switcher.handle_key(&key(KeyCode::Esc)));
        assert!(switcher.stop_handle().is_stopped());
    }

    #[test]
    fn test_switcher_renders_active_screen() {
        let screen = shared(InteractiveScreen::new(1, 1));
        screen.borrow_mut().add(shared(Label::new("hey")));
        let mut switcher = ScreenSwitcher::new(5, 1);
        assert_eq!(
            switcher
                .buffer()
                .render(RenderMode::Plain, '.', Style::default()),
            "....."
        );

        switcher.set_active(Some(screen));
        assert_eq!(
            switcher
                .buffer()
                .render(RenderMode::Plain, '.', Style::default()),
            "hey.."
        );
    }
}
