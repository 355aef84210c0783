//! Terminal sinks: where rendered frames go and where keys come from

mod backend;
mod headless;
mod raw_mode;

pub use backend::CrosstermSink;
pub use headless::HeadlessSink;
pub use raw_mode::RawModeGuard;

use crate::event::KeyEvent;
use crate::geometry::Size;
use std::io;
use tracing::debug;

/// The terminal collaborator the engine draws to and reads keys from.
pub trait TerminalSink {
    /// Write text at the current cursor position
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Flush pending output
    fn flush(&mut self) -> io::Result<()>;

    /// Write a complete frame and flush it as one unit.
    ///
    /// Sinks whose output is shared between handles override this to hold
    /// their output lock across the write and the flush.
    fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        self.write(frame)?;
        self.flush()
    }

    /// Current terminal size in cells
    fn size(&self) -> io::Result<Size>;

    fn width(&self) -> io::Result<i32> {
        Ok(self.size()?.width)
    }

    fn height(&self) -> io::Result<i32> {
        Ok(self.size()?.height)
    }

    /// Read one key press.
    ///
    /// With `blocking` the call waits for input; otherwise it returns `None`
    /// when nothing is pending. Non-key input also yields `None`.
    fn read_key(&mut self, blocking: bool) -> io::Result<Option<KeyEvent>>;

    /// Whether a key can be read without waiting
    fn poll_key_available(&mut self) -> io::Result<bool>;
}

/// Size of the controlling terminal, `None` when there is none
/// (output redirected, CI, detached session).
pub fn query_terminal_size() -> Option<Size> {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), terminal_size::Height(h))) => Some(Size::from((w, h))),
        None => {
            debug!("terminal size unavailable; keeping previous size");
            None
        }
    }
}

/// Convert a signed cell coordinate to a crossterm coordinate.
///
/// The top value stays one below `u16::MAX` so the 1-based escape sequence
/// still fits.
pub(crate) fn to_cell_coord(value: i32) -> u16 {
    u16::try_from(value.max(0))
        .unwrap_or(u16::MAX)
        .min(u16::MAX - 1)
}
