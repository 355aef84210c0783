//! In-memory terminal sink for tests and non-interactive runs

use super::TerminalSink;
use crate::event::KeyEvent;
use crate::geometry::Size;
use std::collections::VecDeque;
use std::io;

/// A terminal that keeps its screen in memory.
///
/// Keys are scripted up front with [`HeadlessSink::push_key`]. Written text
/// lands on a character grid at the cursor. Cursor-position sequences
/// (`CSI row;col H`) move the cursor; other escape sequences are recorded in
/// the raw output but take no cells.
#[derive(Debug, Clone)]
pub struct HeadlessSink {
    size: Size,
    grid: Vec<Vec<char>>,
    cursor: (i32, i32),
    output: String,
    keys: VecDeque<KeyEvent>,
    flushes: usize,
}

impl HeadlessSink {
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            grid: blank_grid(size),
            cursor: (0, 0),
            output: String::new(),
            keys: VecDeque::new(),
            flushes: 0,
        }
    }

    /// Queue a key to be returned by a later read
    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.keys.extend(keys);
    }

    /// Keys not yet consumed
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Change the reported size; the grid is cleared
    pub fn resize(&mut self, width: i32, height: i32) {
        self.size = Size::new(width, height);
        self.grid = blank_grid(self.size);
    }

    /// Visible text, rows joined by `'\n'` with trailing spaces kept
    pub fn screen_text(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One visible row
    pub fn row_text(&self, y: i32) -> Option<String> {
        usize::try_from(y)
            .ok()
            .and_then(|y| self.grid.get(y))
            .map(|row| row.iter().collect())
    }

    /// Everything ever written, escape sequences included
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Last cursor position set or reached by writing
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    fn put(&mut self, ch: char) {
        let (x, y) = self.cursor;
        if let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) {
            if let Some(cell) = self.grid.get_mut(uy).and_then(|row| row.get_mut(ux)) {
                *cell = ch;
            }
        }
        self.cursor.0 += 1;
    }
}

/// Zero-based `(x, y)` for the parameters of a 1-based `CSI row;col H`
fn cursor_target(params: &str) -> (i32, i32) {
    let mut parts = params.split(';').map(|part| part.parse::<i32>().unwrap_or(1).max(1) - 1);
    let row = parts.next().unwrap_or(0);
    let col = parts.next().unwrap_or(0);
    (col, row)
}

fn blank_grid(size: Size) -> Vec<Vec<char>> {
    let width = usize::try_from(size.width).unwrap_or(0);
    let height = usize::try_from(size.height).unwrap_or(0);
    vec![vec![' '; width]; height]
}

impl TerminalSink for HeadlessSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);

        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\x1b' => {
                    // CSI: ESC '[' params... final byte in '@'..='~'
                    if chars.peek() == Some(&'[') {
                        chars.next();
                        let mut params = String::new();
                        for c in chars.by_ref() {
                            if ('@'..='~').contains(&c) {
                                if c == 'H' {
                                    self.cursor = cursor_target(&params);
                                }
                                break;
                            }
                            params.push(c);
                        }
                    }
                }
                '\n' => {
                    self.cursor = (0, self.cursor.1 + 1);
                }
                '\r' => self.cursor.0 = 0,
                c => self.put(c),
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn read_key(&mut self, blocking: bool) -> io::Result<Option<KeyEvent>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None if blocking => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "headless sink has no scripted keys left",
            )),
            None => Ok(None),
        }
    }

    fn poll_key_available(&mut self) -> io::Result<bool> {
        Ok(!self.keys.is_empty())
    }
}
