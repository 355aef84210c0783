//! RAII guard for raw terminal mode

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::io::{self, stdout};
use tracing::warn;

/// Restores the terminal when dropped.
///
/// Dropping leaves raw mode and the alternate screen and shows the cursor.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Only [`super::CrosstermSink::enter_raw_mode`] creates guards
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
