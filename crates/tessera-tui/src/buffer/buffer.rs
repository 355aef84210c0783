//! 2D buffer of cells produced by an element

use super::Cell;
use crate::geometry::{Rect, Size};
use crate::style::Style;
use crossterm::style::ContentStyle;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::Write as _;
use unicode_width::UnicodeWidthChar;

/// How a buffer is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Characters only, styles are ignored
    Plain,
    /// Characters wrapped in escape sequences, one sequence per style run
    #[default]
    Styled,
}

#[derive(Debug, Clone)]
struct RenderMemo {
    mode: RenderMode,
    default_char: char,
    default_style: Style,
    text: String,
}

/// 2D buffer of cells.
///
/// Storage is flat and row-major. Reads outside the buffer return `None` and
/// writes outside it are dropped, since clipped compositing hits the edges
/// routinely.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    size: Size,
    cells: Vec<Cell>,
    /// Last rendered text; cleared by every mutation
    memo: RefCell<Option<RenderMemo>>,
}

impl Buffer {
    /// Create a transparent buffer; negative dimensions become zero
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            cells: vec![Cell::empty(); size.area()],
            memo: RefCell::new(None),
        }
    }

    /// Create a buffer filled with a specific cell
    pub fn filled(width: i32, height: i32, cell: Cell) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            cells: vec![cell; size.area()],
            memo: RefCell::new(None),
        }
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The area this buffer covers, anchored at the origin
    pub fn area(&self) -> Rect {
        Rect::sized(self.size)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.area().contains(x, y) {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }

    fn invalidate(&mut self) {
        *self.memo.get_mut() = None;
    }

    /// Get a cell at position (returns None if out of bounds)
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write the character and/or style of a cell.
    ///
    /// A `None` argument leaves that channel as it was. Use [`Buffer::set_cell`]
    /// to overwrite both channels, including clearing them.
    pub fn set_char(&mut self, x: i32, y: i32, ch: Option<char>, style: Option<Style>) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        self.invalidate();
        let cell = &mut self.cells[idx];
        if ch.is_some() {
            cell.ch = ch;
        }
        if style.is_some() {
            cell.style = style;
        }
    }

    /// Replace a whole cell (does nothing if out of bounds)
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.invalidate();
            self.cells[idx] = cell;
        }
    }

    /// Write a string starting at position, advancing by display width.
    ///
    /// Returns the column after the last written character.
    pub fn set_string(&mut self, x: i32, y: i32, s: &str, style: Option<Style>) -> i32 {
        let mut current_x = x;
        for c in s.chars() {
            if current_x >= self.size.width {
                break;
            }
            self.set_char(current_x, y, Some(c), style);
            let width = c.width().unwrap_or(1).max(1);
            current_x = current_x.saturating_add(width as i32);
        }
        current_x
    }

    /// Fill every cell with the given channels, leaving `None` channels as they were
    pub fn fill(&mut self, ch: Option<char>, style: Option<Style>) {
        self.invalidate();
        for cell in &mut self.cells {
            if ch.is_some() {
                cell.ch = ch;
            }
            if style.is_some() {
                cell.style = style;
            }
        }
    }

    /// Reset every cell to transparent
    pub fn clear(&mut self) {
        self.invalidate();
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Composite `other` onto this buffer with its top-left corner at `(x, y)`.
    ///
    /// Transparent source cells are skipped. The source is clipped on all four
    /// edges, negative offsets included.
    pub fn add_buffer(&mut self, x: i32, y: i32, other: &Buffer) {
        let target = other.area().translate(x, y).intersect(&self.area());
        if target.is_empty() {
            return;
        }
        self.invalidate();

        for dy in target.top()..target.bottom() {
            for dx in target.left()..target.right() {
                let Some(src) = other.get(dx - x, dy - y) else {
                    continue;
                };
                if src.is_transparent() {
                    continue;
                }
                let idx = dy as usize * self.size.width as usize + dx as usize;
                self.cells[idx] = *src;
            }
        }
    }

    /// Give every cell without a style the screen default.
    pub fn replace_null_style(&mut self, default: Style) {
        self.invalidate();
        for cell in &mut self.cells {
            if cell.style.is_none() {
                cell.style = Some(default);
            }
        }
    }

    /// Iterate over all cells with their positions
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Cell)> {
        let width = self.size.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            (x, y, cell)
        })
    }

    /// One row of cells, empty when out of range
    pub fn row(&self, y: i32) -> &[Cell] {
        if y < 0 || y >= self.size.height {
            return &[];
        }
        let width = self.size.width as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    /// Render to text, rows separated by `'\n'`.
    ///
    /// The result is memoised until the buffer is mutated.
    pub fn render(&self, mode: RenderMode, default_char: char, default_style: Style) -> String {
        if let Some(memo) = self.memo.borrow().as_ref() {
            if memo.mode == mode
                && memo.default_char == default_char
                && memo.default_style == default_style
            {
                return memo.text.clone();
            }
        }

        let text = self.render_lines(mode, default_char, default_style).join("\n");
        *self.memo.borrow_mut() = Some(RenderMemo {
            mode,
            default_char,
            default_style,
            text: text.clone(),
        });
        text
    }

    /// Render each row separately, for positioned output
    pub fn render_lines(&self, mode: RenderMode, default_char: char, default_style: Style) -> Vec<String> {
        (0..self.size.height)
            .map(|y| match mode {
                RenderMode::Plain => self
                    .row(y)
                    .iter()
                    .map(|cell| cell.ch.unwrap_or(default_char))
                    .collect(),
                RenderMode::Styled => self.render_styled_row(y, default_char, default_style),
            })
            .collect()
    }

    /// Emit one row, merging neighbouring cells that resolve to the same style.
    fn render_styled_row(&self, y: i32, default_char: char, default_style: Style) -> String {
        let mut out = String::new();
        let mut run = String::new();
        // `None` marks an unstyled run: blank cells with no effective style
        let mut run_style: Option<Option<Style>> = None;

        for cell in self.row(y) {
            let blank = cell.ch.is_none() && cell.style.map_or(true, |s| s.is_empty());
            let key = if blank && default_style.is_empty() {
                None
            } else {
                Some(cell.style.unwrap_or_default().combine(default_style).fix())
            };
            if run_style.is_some_and(|current| current != key) {
                flush_run(&mut out, &mut run, run_style.flatten());
            }
            run_style = Some(key);
            run.push(cell.ch.unwrap_or(default_char));
        }
        if let Some(style) = run_style {
            flush_run(&mut out, &mut run, style);
        }
        out
    }
}

fn flush_run(out: &mut String, run: &mut String, style: Option<Style>) {
    if run.is_empty() {
        return;
    }
    match style {
        Some(style) => {
            let _ = write!(out, "{}", ContentStyle::from(style).apply(run.as_str()));
        }
        None => out.push_str(run),
    }
    run.clear();
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Buffer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn lettered(width: i32, height: i32) -> Buffer {
        let mut buf = Buffer::new(width, height);
        let mut c = b'a';
        for y in 0..height {
            for x in 0..width {
                buf.set_char(x, y, Some(c as char), None);
                c += 1;
            }
        }
        buf
    }

    #[test]
    fn test_buffer_creation() {
        let buf = Buffer::new(10, 5);
        assert_eq!(buf.size(), Size::new(10, 5));
        assert_eq!(buf.cells.len(), 50);

        let clamped = Buffer::new(-4, 3);
        assert_eq!(clamped.size(), Size::new(0, 3));
        assert_eq!(clamped.cells.len(), 0);
    }

    #[test]
    fn test_set_char_out_of_range_is_noop() {
        let mut buf = Buffer::new(3, 2);
        let before = buf.clone();
        for (x, y) in [(-1, 0), (3, 0), (0, -1), (0, 2), (100, 100), (-5, -5)] {
            buf.set_char(x, y, Some('X'), Some(Style::new().bold()));
            assert!(buf.get(x, y).is_none());
        }
        assert_eq!(buf, before);
    }

    #[test]
    fn test_set_char_none_keeps_channel() {
        let mut buf = Buffer::new(2, 1);
        let red = Style::new().fg(Color::Red);
        buf.set_char(0, 0, Some('A'), Some(red));

        buf.set_char(0, 0, Some('B'), None);
        assert_eq!(buf.get(0, 0), Some(&Cell::new('B').style(red)));

        buf.set_char(0, 0, None, Some(Style::new().bold()));
        assert_eq!(buf.get(0, 0).and_then(|c| c.ch), Some('B'));

        buf.set_cell(0, 0, Cell::new('C'));
        assert_eq!(buf.get(0, 0).and_then(|c| c.style), None);
    }

    #[test]
    fn test_add_buffer_negative_offset_clips() {
        let src = lettered(3, 3);
        let mut dst = Buffer::new(2, 2);

        dst.add_buffer(-1, -1, &src);

        assert_eq!(dst.get(0, 0).and_then(|c| c.ch), Some('e'));
        assert_eq!(dst.get(1, 0).and_then(|c| c.ch), Some('f'));
        assert_eq!(dst.get(0, 1).and_then(|c| c.ch), Some('h'));
        assert_eq!(dst.get(1, 1).and_then(|c| c.ch), Some('i'));
    }

    #[test]
    fn test_add_buffer_clips_right_and_bottom() {
        let src = lettered(3, 3);
        let mut dst = Buffer::new(4, 4);

        dst.add_buffer(2, 3, &src);

        assert_eq!(dst.get(2, 3).and_then(|c| c.ch), Some('a'));
        assert_eq!(dst.get(3, 3).and_then(|c| c.ch), Some('b'));
        assert_eq!(dst.get(1, 3).and_then(|c| c.ch), None);
        assert_eq!(dst.get(2, 2).and_then(|c| c.ch), None);
    }

    #[test]
    fn test_add_buffer_extreme_offsets_are_clipped() {
        let src = lettered(2, 1);
        let mut dst = Buffer::filled(3, 2, Cell::new('.'));
        let before = dst.clone();

        for (x, y) in [
            (i32::MAX, 0),
            (0, i32::MAX),
            (i32::MIN, 0),
            (i32::MIN, i32::MIN),
            (i32::MAX - 1, i32::MAX - 1),
        ] {
            dst.add_buffer(x, y, &src);
        }
        assert_eq!(dst, before);

        dst.add_buffer(2, 1, &src);
        assert_eq!(dst.get(2, 1).and_then(|c| c.ch), Some('a'));
    }

    #[test]
    fn test_add_buffer_skips_transparent_cells() {
        let mut dst = Buffer::filled(3, 1, Cell::new('.'));
        let mut src = Buffer::new(3, 1);
        src.set_char(1, 0, Some('#'), None);
        src.set_char(2, 0, None, Some(Style::new().bg(Color::Blue)));

        dst.add_buffer(0, 0, &src);

        assert_eq!(dst.render(RenderMode::Plain, ' ', Style::new()), ".# ");
        assert_eq!(dst.get(0, 0), Some(&Cell::new('.')));
        assert_eq!(dst.get(1, 0), Some(&Cell::new('#')));
        // A style-only cell is opaque and replaces the dot
        assert_eq!(dst.get(2, 0).and_then(|c| c.ch), None);
    }

    #[test]
    fn test_replace_null_style() {
        let mut buf = Buffer::new(2, 1);
        let bold = Style::new().bold();
        let blue = Style::new().bg(Color::Blue);
        buf.set_char(0, 0, Some('x'), Some(bold));

        buf.replace_null_style(blue);

        assert_eq!(buf.get(0, 0).and_then(|c| c.style), Some(bold));
        assert_eq!(buf.get(1, 0).and_then(|c| c.style), Some(blue));
    }

    #[test]
    fn test_render_plain() {
        let mut buf = Buffer::new(3, 2);
        buf.set_string(0, 0, "ab", Some(Style::new().bold()));
        buf.set_char(2, 1, Some('z'), None);

        assert_eq!(buf.render(RenderMode::Plain, '.', Style::new()), "ab.\n..z");
    }

    #[test]
    fn test_render_styled_merges_runs() {
        let mut buf = Buffer::new(4, 1);
        let red = Style::new().fg(Color::Red);
        buf.set_string(0, 0, "abc", Some(red));
        buf.set_char(3, 0, Some('d'), Some(Style::new().fg(Color::Blue)));

        let text = buf.render(RenderMode::Styled, ' ', Style::new());

        let red_run = format!("{}", ContentStyle::from(red.fix()).apply("abc"));
        assert!(text.starts_with(&red_run));
        assert_eq!(text.matches("abc").count(), 1);
        assert!(text.ends_with(&format!(
            "{}",
            ContentStyle::from(Style::new().fg(Color::Blue).fix()).apply("d")
        )));
    }

    #[test]
    fn test_render_styled_blank_cells_stay_raw() {
        let mut buf = Buffer::new(3, 1);
        buf.set_char(2, 0, Some('x'), Some(Style::new().bold()));

        let text = buf.render(RenderMode::Styled, ' ', Style::new());

        assert!(text.starts_with("  \u{1b}"));
    }

    #[test]
    fn test_render_styled_blank_cells_with_empty_style_stay_raw() {
        let mut buf = Buffer::new(3, 1);
        buf.set_char(2, 0, Some('x'), Some(Style::new().bold()));
        buf.replace_null_style(Style::default());

        let text = buf.render(RenderMode::Styled, ' ', Style::new());

        let bold_x = format!("{}", ContentStyle::from(Style::new().bold().fix()).apply("x"));
        assert_eq!(text, format!("  {bold_x}"));
    }

    #[test]
    fn test_render_memo_invalidated_by_mutation() {
        let mut buf = Buffer::new(2, 1);
        assert_eq!(buf.render(RenderMode::Plain, '-', Style::new()), "--");
        assert!(buf.memo.borrow().is_some());

        buf.set_char(0, 0, Some('a'), None);
        assert!(buf.memo.borrow().is_none());
        assert_eq!(buf.render(RenderMode::Plain, '-', Style::new()), "a-");
        // A different default character is not served from the memo
        assert_eq!(buf.render(RenderMode::Plain, '_', Style::new()), "a_");
    }

    #[test]
    fn test_set_string_wide_chars() {
        let mut buf = Buffer::new(6, 1);
        let end = buf.set_string(0, 0, "日本", None);
        assert_eq!(end, 4);
        assert_eq!(buf.get(2, 0).and_then(|c| c.ch), Some('本'));
    }
}
