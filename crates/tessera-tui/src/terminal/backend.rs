//! Terminal sink backed by crossterm and stdout

use super::{RawModeGuard, TerminalSink};
use crate::event::{KeyEvent, KeyEventKind};
use crate::geometry::Size;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{self, enable_raw_mode, Clear, ClearType, EnterAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Terminal sink writing to stdout through crossterm.
///
/// Output is buffered behind a mutex and clones share the same writer. A
/// frame is written and flushed under a single lock, so writes from other
/// handles land before or after it, never inside it.
#[derive(Debug, Clone)]
pub struct CrosstermSink {
    out: Arc<Mutex<BufWriter<Stdout>>>,
}

impl CrosstermSink {
    /// Create a sink over the process's stdout
    pub fn new() -> Self {
        Self {
            out: Arc::new(Mutex::new(BufWriter::new(io::stdout()))),
        }
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BufWriter<Stdout>>> {
        self.out
            .lock()
            .map_err(|_| io::Error::other("terminal writer lock poisoned"))
    }

    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// The returned guard restores the terminal when dropped.
    pub fn enter_raw_mode(&mut self) -> io::Result<RawModeGuard> {
        enable_raw_mode()?;
        let mut out = self.lock()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(RawModeGuard::new())
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        let mut out = self.lock()?;
        if visible {
            execute!(out, Show)
        } else {
            execute!(out, Hide)
        }
    }

    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Default for CrosstermSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSink for CrosstermSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.lock()?.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }

    fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        let mut out = self.lock()?;
        out.write_all(frame.as_bytes())?;
        out.flush()
    }

    fn size(&self) -> io::Result<Size> {
        terminal::size().map(Size::from)
    }

    fn read_key(&mut self, blocking: bool) -> io::Result<Option<KeyEvent>> {
        if !blocking && !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        self.next_key()
    }

    fn poll_key_available(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_writer() {
        let sink = CrosstermSink::new();
        let other = sink.clone();
        assert!(Arc::ptr_eq(&sink.out, &other.out));
    }
}
