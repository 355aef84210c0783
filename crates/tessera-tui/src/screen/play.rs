//! The render, read, dispatch cycle shared by interactive screens

use crate::buffer::{Buffer, RenderMode};
use crate::error::Result;
use crate::event::KeyEvent;
use crate::geometry::Point;
use crate::style::Style;
use crate::terminal::{to_cell_coord, TerminalSink};
use crossterm::cursor::MoveTo;
use crossterm::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Cooperative stop flag for a play loop.
///
/// Clones share the flag, so a handle can be given to hooks or other threads.
/// The loop checks it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to end after the current iteration
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn same_flag(&self, other: &StopHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// How a play loop renders and reads input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySettings {
    /// Block on key reads; when false the loop busy-polls
    pub wait_for_input: bool,
    pub render_mode: RenderMode,
    /// Character drawn for cells without one
    pub default_char: char,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            wait_for_input: true,
            render_mode: RenderMode::Styled,
            default_char: ' ',
        }
    }
}

/// Something that can drive a play loop.
pub trait Playable {
    fn play_settings(&self) -> PlaySettings;

    fn stop_handle(&self) -> StopHandle;

    /// Draw the current frame to the sink
    fn present(&mut self, sink: &mut dyn TerminalSink) -> Result<()>;

    /// Dispatch one key; `true` when something consumed it
    fn handle_key(&mut self, key: &KeyEvent) -> bool;

    /// End-of-cycle hook, run once per iteration
    fn end_cycle(&mut self);

    /// Run until stopped.
    ///
    /// Each iteration renders, then reads at most one key and dispatches it.
    /// When not waiting for input and nothing is pending, the key step is
    /// skipped.
    fn play(&mut self, sink: &mut dyn TerminalSink) -> Result<()> {
        let stop = self.stop_handle();
        stop.reset();
        debug!("play loop started");

        while !stop.is_stopped() {
            self.present(sink)?;

            let wait = self.play_settings().wait_for_input;
            if !wait && !sink.poll_key_available()? {
                self.end_cycle();
                continue;
            }

            if let Some(key) = sink.read_key(wait)? {
                let handled = self.handle_key(&key);
                debug!(code = ?key.code, handled, "dispatched key");
            }
            self.end_cycle();
        }

        debug!("play loop stopped");
        Ok(())
    }
}

/// The text of one frame: each row prefixed by a move to its first column,
/// then a final move to `cursor` when there is one
pub(crate) fn frame_text(frame: &Buffer, settings: PlaySettings, cursor: Option<Point>) -> String {
    let rendered = frame.render(settings.render_mode, settings.default_char, Style::default());
    let mut text = String::with_capacity(rendered.len() + 8 * frame.height().max(0) as usize);
    for (y, row) in rendered.split('\n').enumerate() {
        let y = to_cell_coord(i32::try_from(y).unwrap_or(i32::MAX));
        let _ = MoveTo(0, y).write_ansi(&mut text);
        text.push_str(row);
    }
    if let Some(cursor) = cursor {
        let _ = MoveTo(to_cell_coord(cursor.x), to_cell_coord(cursor.y)).write_ansi(&mut text);
    }
    text
}

/// Send one frame to the sink as a single write and flush
pub(crate) fn present_frame(
    frame: &Buffer,
    settings: PlaySettings,
    cursor: Option<Point>,
    sink: &mut dyn TerminalSink,
) -> Result<()> {
    sink.write_frame(&frame_text(frame, settings, cursor))?;
    Ok(())
}
