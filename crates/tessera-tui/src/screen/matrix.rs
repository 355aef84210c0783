//! Sparse grid of focusable elements navigated by a pointer

use crate::element::same_node;
use crate::geometry::Point;
use crate::widget::SelectableRef;
use std::fmt;

/// Pointer movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// 2D grid whose cells may hold a focusable element.
///
/// The grid grows as cells are assigned, up to [`SelectionMatrix::MAX_EXTENT`]
/// cells per axis. Lookups outside it return `None`.
#[derive(Default)]
pub struct SelectionMatrix {
    rows: Vec<Vec<Option<SelectableRef>>>,
    width: i32,
}

impl SelectionMatrix {
    /// Largest number of columns or rows the grid may grow to
    pub const MAX_EXTENT: i32 = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        i32::try_from(self.rows.len()).unwrap_or(i32::MAX)
    }

    /// True when no cell holds an element
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_none)
    }

    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<SelectableRef> {
        if !self.in_range(x, y) {
            return None;
        }
        self.rows[y as usize][x as usize].clone()
    }

    /// Whether `(x, y)` is a cell the grid can hold
    pub const fn accepts(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < Self::MAX_EXTENT && y < Self::MAX_EXTENT
    }

    /// Put an element at `(x, y)`, growing the grid as needed.
    ///
    /// Returns the element previously held there. Coordinates the grid
    /// does not [accept](SelectionMatrix::accepts) are ignored.
    pub fn set(&mut self, x: i32, y: i32, node: SelectableRef) -> Option<SelectableRef> {
        if !Self::accepts(x, y) {
            return None;
        }
        self.grow(x + 1, y + 1);
        self.rows[y as usize][x as usize].replace(node)
    }

    /// Empty the cell at `(x, y)`
    pub fn take(&mut self, x: i32, y: i32) -> Option<SelectableRef> {
        if !self.in_range(x, y) {
            return None;
        }
        self.rows[y as usize][x as usize].take()
    }

    /// Where `node` sits, by identity
    pub fn position_of(&self, node: &SelectableRef) -> Option<Point> {
        self.cells()
            .find(|(_, cell)| same_node(cell, node))
            .map(|(at, _)| at)
    }

    /// First occupied cell in row-major order
    pub fn first(&self) -> Option<Point> {
        self.cells().next().map(|(at, _)| at)
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Point, &SelectableRef)> {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| {
                cell.as_ref()
                    .map(|node| (Point::new(x as i32, y as i32), node))
            })
        })
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.width = 0;
    }

    fn grow(&mut self, width: i32, height: i32) {
        if width > self.width {
            self.width = width;
        }
        let columns = self.width as usize;
        while self.rows.len() < height as usize {
            self.rows.push(Vec::new());
        }
        for row in &mut self.rows {
            row.resize_with(columns, || None);
        }
    }
}

impl fmt::Debug for SelectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionMatrix")
            .field("width", &self.width)
            .field("height", &self.height())
            .field("occupied", &self.cells().count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::shared;
    use crate::widget::Button;
    use std::rc::Rc;

    fn node(text: &str) -> SelectableRef {
        shared(Button::new(text))
    }

    #[test]
    fn test_matrix_grows_on_set() {
        let mut matrix = SelectionMatrix::new();
        assert!(matrix.is_empty());

        matrix.set(2, 1, node("a"));
        assert_eq!(matrix.width(), 3);
        assert_eq!(matrix.height(), 2);
        assert!(matrix.get(0, 0).is_none());
        assert!(matrix.get(2, 1).is_some());
        assert!(matrix.get(5, 5).is_none());
        assert!(matrix.get(-1, 0).is_none());
        assert!(!matrix.is_empty());
    }

    #[test]
    fn test_matrix_position_and_first() {
        let mut matrix = SelectionMatrix::new();
        let a = node("a");
        let b = node("b");
        matrix.set(1, 1, Rc::clone(&a));
        matrix.set(0, 2, Rc::clone(&b));

        assert_eq!(matrix.position_of(&b), Some(Point::new(0, 2)));
        assert_eq!(matrix.first(), Some(Point::new(1, 1)));

        matrix.take(1, 1);
        assert_eq!(matrix.position_of(&a), None);
        assert_eq!(matrix.first(), Some(Point::new(0, 2)));
    }

    #[test]
    fn test_matrix_ignores_negative_set() {
        let mut matrix = SelectionMatrix::new();
        assert!(matrix.set(-1, 0, node("a")).is_none());
        assert!(matrix.is_empty());
        assert_eq!(matrix.width(), 0);
    }

    #[test]
    fn test_matrix_ignores_cells_past_extent() {
        let mut matrix = SelectionMatrix::new();
        let limit = SelectionMatrix::MAX_EXTENT;
        assert!(matrix.set(i32::MAX, 0, node("a")).is_none());
        assert!(matrix.set(0, i32::MAX, node("a")).is_none());
        assert!(matrix.set(limit, 0, node("a")).is_none());
        assert!(matrix.is_empty());
        assert_eq!(matrix.width(), 0);
        assert_eq!(matrix.height(), 0);

        matrix.set(limit - 1, 0, node("b"));
        assert_eq!(matrix.width(), limit);
        assert!(matrix.get(limit - 1, 0).is_some());
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }
}
