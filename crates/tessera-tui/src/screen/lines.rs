//! Screen that joins line elements into connected box-drawing glyphs

use super::Screen;
use crate::buffer::{BitBuffer, Buffer, GlyphTable};
use crate::element::{same_node, Element, ElementCore, ElementRef};
use crate::style::Style;
use crate::widget::Line;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A screen whose line elements share one bit mask.
///
/// Every line's mask is OR-ed in at its resolved position and the combined
/// mask is converted with one glyph table, so crossings and corners come out
/// as junctions. Ordinary children are composited on top.
pub struct ConnectedLinesScreen {
    screen: Screen,
    lines: Vec<Rc<RefCell<Line>>>,
    glyphs: GlyphTable,
    line_style: Style,
}

impl ConnectedLinesScreen {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen: Screen::new(width, height),
            lines: Vec::new(),
            glyphs: GlyphTable::LIGHT,
            line_style: Style::default(),
        }
    }

    /// Builder: glyph table for the joined lines
    pub fn glyphs(mut self, glyphs: GlyphTable) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn set_glyphs(&mut self, glyphs: GlyphTable) {
        if self.glyphs != glyphs {
            self.glyphs = glyphs;
            self.screen.core_mut().mark_dirty();
        }
    }

    pub fn set_line_style(&mut self, style: Style) {
        if self.line_style != style {
            self.line_style = style;
            self.screen.core_mut().mark_dirty();
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Add a line to the shared mask; returns `false` if already present
    pub fn add_line(&mut self, line: Rc<RefCell<Line>>) -> bool {
        if self.lines.iter().any(|existing| same_node(existing, &line)) {
            return false;
        }
        self.lines.push(line);
        self.screen.core_mut().mark_dirty();
        true
    }

    pub fn remove_line(&mut self, line: &Rc<RefCell<Line>>) -> bool {
        let before = self.lines.len();
        self.lines.retain(|existing| !same_node(existing, line));
        let removed = self.lines.len() != before;
        if removed {
            self.screen.core_mut().mark_dirty();
        }
        removed
    }

    pub fn lines(&self) -> &[Rc<RefCell<Line>>] {
        &self.lines
    }

    /// Add an ordinary child drawn over the lines
    pub fn add(&mut self, element: ElementRef) -> bool {
        self.screen.add(element)
    }

    fn line_mask(&self) -> BitBuffer {
        let size = self.screen.size();
        let scroll = self.screen.scroll();
        let mut mask = BitBuffer::new(size.width, size.height);
        for line in &self.lines {
            let line = line.borrow();
            let bits = line.bits();
            let at = line.core().resolve(size, bits.size()) - scroll;
            mask.add_buffer(at.x, at.y, &bits);
        }
        mask
    }
}

impl Element for ConnectedLinesScreen {
    fn core(&self) -> &ElementCore {
        self.screen.core()
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        self.screen.core_mut()
    }

    fn generate_buffer(&mut self) -> Buffer {
        let style = self.line_style.combine(self.screen.default_style());
        let mut canvas = self.line_mask().to_buffer(&self.glyphs, style);
        self.screen.compose(&mut canvas);
        canvas
    }

    fn kind(&self) -> &'static str {
        "connected_lines_screen"
    }

    fn child_needs_recomposite(&self) -> bool {
        self.screen.child_needs_recomposite()
            || self
                .lines
                .iter()
                .any(|line| line.borrow().needs_recomposite())
    }

    fn mark_children_clean(&mut self) {
        self.screen.mark_children_clean();
        for line in &self.lines {
            line.borrow_mut().core_mut().consume();
        }
    }

    fn refresh(&mut self) {
        self.screen.refresh();
    }
}

impl fmt::Debug for ConnectedLinesScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectedLinesScreen")
            .field("screen", &self.screen)
            .field("lines", &self.lines.len())
            .field("glyphs", &self.glyphs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RenderMode;
    use crate::element::shared;
    use crate::geometry::Placement;
    use crate::widget::{Label, LineShape};

    fn plain(screen: &mut ConnectedLinesScreen) -> String {
        screen.buffer().render(RenderMode::Plain, ' ', Style::default())
    }

    #[test]
    fn test_crossing_lines_join() {
        let mut screen = ConnectedLinesScreen::new(5, 3);
        screen.add_line(shared(Line::horizontal(5).at(0, 1)));
        screen.add_line(shared(Line::vertical(3).at(2, 0)));

        assert_eq!(plain(&mut screen), "  ╷  \n╶─┼─╴\n  ╵  ");
    }

    #[test]
    fn test_box_with_divider() {
        let mut screen = ConnectedLinesScreen::new(5, 3);
        screen.add_line(shared(Line::rectangle(5, 3)));
        screen.add_line(shared(Line::vertical(3).placed(Placement::TopCenter)));

        assert_eq!(plain(&mut screen), "┌─┬─┐\n│ │ │\n└─┴─┘");
    }

    #[test]
    fn test_children_drawn_over_lines() {
        let mut screen = ConnectedLinesScreen::new(4, 3);
        screen.add_line(shared(Line::rectangle(4, 3)));
        screen.add(shared(Label::new("ab").at(1, 1)));

        assert_eq!(plain(&mut screen), "┌──┐\n│ab│\n└──┘");
    }

    #[test]
    fn test_line_change_triggers_recomposite() {
        let line = shared(Line::horizontal(2));
        let mut screen = ConnectedLinesScreen::new(3, 1);
        screen.add_line(line.clone());
        let first = screen.buffer();
        assert!(Rc::ptr_eq(&first, &screen.buffer()));

        line.borrow_mut().set_shape(LineShape::Horizontal(3));
        assert_eq!(plain(&mut screen), "╶─╴");
    }

    #[test]
    fn test_duplicate_line_ignored() {
        let line = shared(Line::horizontal(2));
        let mut screen = ConnectedLinesScreen::new(3, 1);
        assert!(screen.add_line(line.clone()));
        assert!(!screen.add_line(line.clone()));
        assert_eq!(screen.lines().len(), 1);
        assert!(screen.remove_line(&line));
    }
}
