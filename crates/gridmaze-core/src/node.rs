//! The [`GridNode`] type and its [`NodeState`] tag.

use crate::geom::Cell;

/// Semantic tag of a grid node. Exactly one per node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    Start,
    End,
    Wall,
    #[default]
    Empty,
    Visited,
    Solution,
}

impl NodeState {
    /// Whether a search may step onto a node in this state.
    ///
    /// Decoration left by a previous run (`Visited`, `Solution`) does not
    /// block; `Start` is never re-entered.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Empty | Self::End | Self::Visited | Self::Solution)
    }

    /// Whether this state is decoration from a search rather than terrain.
    #[inline]
    pub const fn is_annotation(self) -> bool {
        matches!(self, Self::Visited | Self::Solution)
    }

    /// Whether the state marks one of the two search endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// ASCII glyph used by [`Grid::parse`](crate::Grid::parse) and
    /// `Display`.
    pub const fn glyph(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Wall => '#',
            Self::Empty => '.',
            Self::Visited => 'v',
            Self::Solution => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            '#' => Some(Self::Wall),
            '.' => Some(Self::Empty),
            'v' => Some(Self::Visited),
            '*' => Some(Self::Solution),
            _ => None,
        }
    }
}

/// One cell of a [`Grid`](crate::Grid), with search bookkeeping.
///
/// `parent` is an index into the arena of the grid that owns this node; it
/// is only meaningful inside that grid and only ever points at a node that
/// was settled earlier in the same search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridNode {
    pub cell: Cell,
    pub state: NodeState,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub parent: Option<usize>,
    /// Cost from start.
    #[cfg_attr(feature = "serde", serde(skip, default = "unreached"))]
    pub g: f64,
    /// Heuristic estimate to the goal.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub h: f64,
    /// `g + h`.
    #[cfg_attr(feature = "serde", serde(skip, default = "unreached"))]
    pub f: f64,
}

// Search bookkeeping is not serialized; decoded nodes come back fresh.
#[cfg(feature = "serde")]
fn unreached() -> f64 {
    f64::INFINITY
}

impl GridNode {
    /// A fresh node with no search bookkeeping.
    pub fn new(cell: Cell, state: NodeState) -> Self {
        Self {
            cell,
            state,
            parent: None,
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
        }
    }

    /// Shorthand for `self.cell.row`.
    #[inline]
    pub fn row(&self) -> i32 {
        self.cell.row
    }

    /// Shorthand for `self.cell.col`.
    #[inline]
    pub fn col(&self) -> i32 {
        self.cell.col
    }

    /// Drop everything a previous search wrote.
    #[inline]
    pub fn reset_search(&mut self) {
        self.parent = None;
        self.g = f64::INFINITY;
        self.h = 0.0;
        self.f = f64::INFINITY;
    }

    /// Tag the node as explored, leaving endpoints untouched.
    #[inline]
    pub fn mark_visited(&mut self) {
        if !self.state.is_endpoint() {
            self.state = NodeState::Visited;
        }
    }

    /// Tag the node as part of the solution, leaving endpoints untouched.
    #[inline]
    pub fn mark_solution(&mut self) {
        if !self.state.is_endpoint() {
            self.state = NodeState::Solution;
        }
    }
}
