//! Geometry primitives: [`Cell`] and [`Rect`].
//!
//! Coordinates are `(row, col)`, row-major, with rows growing downwards.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Rows grow down, columns grow right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Component-wise sign, useful to turn a displacement into a unit
    /// direction.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.row.signum(), self.col.signum())
    }

    /// Whether `other` is one king-move away (cardinal or diagonal).
    #[inline]
    pub fn touches(self, other: Cell) -> bool {
        let d = other - self;
        self != other && d.row.abs() <= 1 && d.col.abs() <= 1
    }

    /// The four cardinal neighbours in left, right, top, bottom order.
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(-1, 0),
            self.shift(1, 0),
        ]
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Cell,
    pub max: Cell,
}

impl Rect {
    /// Create a new rectangle from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self {
            min: Cell::new(row0.min(row1), col0.min(col1)),
            max: Cell::new(row0.max(row1), col0.max(col1)),
        }
    }

    /// Rectangle of the given size anchored at `origin`.
    #[inline]
    pub fn with_size(origin: Cell, width: i32, height: i32) -> Self {
        Self::new(
            origin.row,
            origin.col,
            origin.row + height.max(0),
            origin.col + width.max(0),
        )
    }

    /// Number of columns.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.col - self.min.col
    }

    /// Number of rows.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.row - self.min.row
    }

    /// Number of cells in the rectangle.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.width() as usize) * (self.height() as usize)
        }
    }

    /// Whether the rectangle contains no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Whether `c` lies inside the rectangle.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= self.min.row && c.row < self.max.row && c.col >= self.min.col && c.col < self.max.col
    }

    /// The cell at the middle of the rectangle (rounded towards `min`).
    #[inline]
    pub fn center(self) -> Cell {
        Cell::new(
            self.min.row + self.height() / 2,
            self.min.col + self.width() / 2,
        )
    }

    /// Intersection of two rectangles. Returns an empty rectangle if they
    /// don't overlap.
    pub fn intersect(self, other: Rect) -> Self {
        let min = Cell::new(
            self.min.row.max(other.min.row),
            self.min.col.max(other.min.col),
        );
        let max = Cell::new(
            self.max.row.min(other.max.row),
            self.max.col.min(other.max.col),
        );
        if min.row >= max.row || min.col >= max.col {
            return Self::default();
        }
        Self { min, max }
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(self) -> RectIter {
        RectIter {
            rect: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Rect {
    type Item = Cell;
    type IntoIter = RectIter;

    fn into_iter(self) -> RectIter {
        self.iter()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Row-major iterator over the cells of a [`Rect`].
#[derive(Clone, Debug)]
pub struct RectIter {
    rect: Rect,
    cur: Cell,
}

impl Iterator for RectIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.rect.is_empty() || self.cur.row >= self.rect.max.row {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.rect.max.col {
            self.cur.col = self.rect.min.col;
            self.cur.row += 1;
        }
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.rect.is_empty() || self.cur.row >= self.rect.max.row {
            0
        } else {
            let full_rows = (self.rect.max.row - self.cur.row - 1) as usize;
            let rest = (self.rect.max.col - self.cur.col) as usize;
            full_rows * self.rect.width() as usize + rest
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for RectIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn cell_touches() {
        let c = Cell::new(3, 3);
        assert!(c.touches(Cell::new(2, 2)));
        assert!(c.touches(Cell::new(3, 4)));
        assert!(!c.touches(c));
        assert!(!c.touches(Cell::new(5, 3)));
    }

    #[test]
    fn rect_iter_row_major() {
        let r = Rect::new(0, 0, 2, 3);
        let cells: Vec<Cell> = r.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(0, 2));
        assert_eq!(cells[3], Cell::new(1, 0));
        assert_eq!(r.iter().len(), 6);
    }

    #[test]
    fn rect_contains_half_open() {
        let r = Rect::with_size(Cell::new(1, 1), 4, 2);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 2);
        assert!(r.contains(Cell::new(1, 1)));
        assert!(r.contains(Cell::new(2, 4)));
        assert!(!r.contains(Cell::new(3, 1)));
        assert!(!r.contains(Cell::new(1, 5)));
    }

    #[test]
    fn rect_intersect_and_center() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 15, 15);
        assert_eq!(a.intersect(b), Rect::new(5, 5, 10, 10));
        assert!(a.intersect(Rect::new(20, 20, 30, 30)).is_empty());
        assert_eq!(a.center(), Cell::new(5, 5));
    }
}
