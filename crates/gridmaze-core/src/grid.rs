//! The [`Grid`] arena of [`GridNode`]s.
//!
//! A grid owns its nodes in a flat row-major `Vec`; nodes refer to each
//! other (via `parent`) by index into that `Vec`. Cloning a grid is a deep
//! copy, which is what gives every search its own private bookkeeping.

use std::fmt;

use crate::geom::{Cell, Rect};
use crate::node::{GridNode, NodeState};

/// A rectangular, row-major grid of [`GridNode`]s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    nodes: Vec<GridNode>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a new grid of `Empty` nodes.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let nodes = Rect::new(0, 0, height, width)
            .iter()
            .map(|c| GridNode::new(c, NodeState::Empty))
            .collect();
        Self {
            nodes,
            width,
            height,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the grid has no nodes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The bounding rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.height, self.width)
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds().contains(c)
    }

    // -----------------------------------------------------------------------
    // Index helpers
    // -----------------------------------------------------------------------

    /// Convert a cell to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.width as usize + c.col as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        let w = self.width.max(1) as usize;
        Cell::new((idx / w) as i32, (idx % w) as i32)
    }

    /// The node at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn node(&self, idx: usize) -> &GridNode {
        &self.nodes[idx]
    }

    /// Mutable access to the node at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> &mut GridNode {
        &mut self.nodes[idx]
    }

    /// The node at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<&GridNode> {
        self.index(c).map(|i| &self.nodes[i])
    }

    /// Mutable access to the node at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at_mut(&mut self, c: Cell) -> Option<&mut GridNode> {
        self.index(c).map(|i| &mut self.nodes[i])
    }

    /// State of the node at `c`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, c: Cell) -> Option<NodeState> {
        self.at(c).map(|n| n.state)
    }

    /// Set the state at `c`. Does nothing if out of bounds.
    pub fn set_state(&mut self, c: Cell, state: NodeState) {
        if let Some(n) = self.at_mut(c) {
            n.state = state;
        }
    }

    /// Whether a search may step onto `c`.
    #[inline]
    pub fn is_traversable(&self, c: Cell) -> bool {
        self.state(c).is_some_and(NodeState::is_traversable)
    }

    /// Whether `c` is a wall. Out-of-bounds cells are not walls; callers
    /// that want the border treated as solid check [`contains`](Self::contains).
    #[inline]
    pub fn is_wall(&self, c: Cell) -> bool {
        self.state(c) == Some(NodeState::Wall)
    }

    /// All nodes in row-major order.
    #[inline]
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    // -----------------------------------------------------------------------
    // Whole-grid operations
    // -----------------------------------------------------------------------

    /// The first node tagged `Start`, if any.
    pub fn start(&self) -> Option<Cell> {
        self.find(NodeState::Start)
    }

    /// The first node tagged `End`, if any.
    pub fn end(&self) -> Option<Cell> {
        self.find(NodeState::End)
    }

    fn find(&self, state: NodeState) -> Option<Cell> {
        self.nodes.iter().find(|n| n.state == state).map(|n| n.cell)
    }

    /// Set every node to `state`.
    pub fn fill(&mut self, state: NodeState) {
        for n in &mut self.nodes {
            n.state = state;
        }
    }

    /// Count how many nodes are in `state`.
    pub fn count(&self, state: NodeState) -> usize {
        self.nodes.iter().filter(|n| n.state == state).count()
    }

    /// Deep copy with all search bookkeeping cleared.
    ///
    /// This is what a search should be handed: it can then write `parent`,
    /// `g`, `h` and `f` without disturbing the grid it was taken from.
    pub fn snapshot(&self) -> Grid {
        let mut g = self.clone();
        g.reset_search();
        g
    }

    /// Clear `parent`/`g`/`h`/`f` on every node.
    pub fn reset_search(&mut self) {
        for n in &mut self.nodes {
            n.reset_search();
        }
    }

    /// Turn `Visited` and `Solution` decoration back into `Empty`.
    pub fn clear_annotations(&mut self) {
        for n in &mut self.nodes {
            if n.state.is_annotation() {
                n.state = NodeState::Empty;
            }
        }
    }

    /// Walk `parent` links from `idx` back to the root, returning the
    /// indices root-first.
    pub fn trace_back(&self, idx: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            chain.push(i);
            cur = self.nodes[i].parent;
            // Chains are acyclic, so no walk is longer than the arena.
            if chain.len() > self.nodes.len() {
                break;
            }
        }
        chain.reverse();
        chain
    }

    // -----------------------------------------------------------------------
    // Text form
    // -----------------------------------------------------------------------

    /// Build a grid from ASCII rows.
    ///
    /// Glyphs: `#` wall, `.` empty, `S` start, `E` end, `v` visited,
    /// `*` solution. Leading/trailing whitespace of the whole string is
    /// trimmed, as is leading indentation of each row.
    pub fn parse(s: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim_start).collect();
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridParseError::Empty);
        }
        let width = rows[0].chars().count();
        let mut grid = Grid::new(width as i32, rows.len() as i32);

        for (r, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::InconsistentWidth {
                    row: r,
                    expected: width,
                    found,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as i32, c as i32);
                let state =
                    NodeState::from_glyph(ch).ok_or(GridParseError::InvalidChar { ch, cell })?;
                grid.set_state(cell, state);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.nodes.iter().enumerate() {
            if i > 0 && i % self.width as usize == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", n.state.glyph())?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a grid from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridParseError {
    /// No rows at all.
    Empty,
    /// A row is not as wide as the first one.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a known glyph.
    InvalidChar { ch: char, cell: Cell },
}

impl fmt::Display for GridParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no rows"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, cell } => {
                write!(f, "grid contains invalid character \u{201c}{ch}\u{201d} at {cell}")
            }
        }
    }
}

impl std::error::Error for GridParseError {}
