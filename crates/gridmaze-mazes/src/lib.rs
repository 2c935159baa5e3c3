//! Maze generators for gridmaze: backtracker, Prim, BSP rooms, caves.
//!
//! Every generator is an [`Iterator`] of [`MazeStep`]s. Each step is a batch
//! of cells to turn from wall into passage; a caller starts from a
//! wall-filled [`Grid`], pulls steps at its own pace and applies them with
//! [`carve`]. Steps are purely additive: no cell is yielded twice by one run.

pub mod backtracker;
pub mod bsp;
pub mod cave;
pub mod prim;

use std::fmt;
use std::str::FromStr;

use gridmaze_core::{Cell, Grid, NodeState, Rect};
use rand::Rng;

pub use backtracker::Backtracker;
pub use bsp::{Bsp, BspConfig};
pub use cave::{Cave, CaveConfig};
pub use prim::Prim;

/// One batch of cells to carve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeStep {
    pub cells_to_carve: Vec<Cell>,
}

impl MazeStep {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells_to_carve.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells_to_carve.is_empty()
    }
}

/// Size of the area to generate, and where to place it in the target grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeParams {
    pub width: i32,
    pub height: i32,
    /// Added to every yielded cell.
    pub offset: Cell,
}

impl MazeParams {
    /// Params for a `width` x `height` area at the origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            offset: Cell::ZERO,
        }
    }

    /// Same area, shifted by `offset` in the target grid.
    pub fn with_offset(mut self, offset: Cell) -> Self {
        self.offset = offset;
        self
    }

    /// Params filling `grid` inside a one-cell border.
    pub fn bordered(grid: &Grid) -> Self {
        Self::new(grid.width() - 2, grid.height() - 2).with_offset(Cell::new(1, 1))
    }

    /// The generated area in local coordinates.
    #[inline]
    pub fn area(&self) -> Rect {
        Rect::with_size(Cell::ZERO, self.width, self.height)
    }

    /// Number of cells in the area.
    #[inline]
    pub fn len(&self) -> usize {
        self.area().len()
    }

    /// Flat index of local cell `c`.
    #[inline]
    pub(crate) fn index(&self, c: Cell) -> usize {
        (c.row * self.width + c.col) as usize
    }

    /// Translate a local cell into target-grid coordinates.
    #[inline]
    pub(crate) fn place(&self, c: Cell) -> Cell {
        c + self.offset
    }

    /// A random cell with odd row and column, or `None` if the area has none.
    pub(crate) fn random_odd_cell<R: Rng>(&self, rng: &mut R) -> Option<Cell> {
        use rand::RngExt;

        let (rows, cols) = (self.height / 2, self.width / 2);
        if rows <= 0 || cols <= 0 {
            return None;
        }
        Some(Cell::new(
            2 * rng.random_range(0..rows) + 1,
            2 * rng.random_range(0..cols) + 1,
        ))
    }
}

/// Selector for the maze generators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeAlgorithm {
    #[default]
    Backtracker,
    Prim,
    Bsp,
    Cave,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 4] = [Self::Backtracker, Self::Prim, Self::Bsp, Self::Cave];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Backtracker => "backtracker",
            Self::Prim => "prim",
            Self::Bsp => "bsp",
            Self::Cave => "cave",
        }
    }

    /// Start a run of this generator with default configuration.
    pub fn execute<R: Rng>(self, params: MazeParams, rng: R) -> MazeRun<R> {
        log::debug!(
            "maze {}: {}x{} at {}",
            self.name(),
            params.width,
            params.height,
            params.offset
        );
        match self {
            Self::Backtracker => MazeRun::Backtracker(Backtracker::new(params, rng)),
            Self::Prim => MazeRun::Prim(Prim::new(params, rng)),
            Self::Bsp => MazeRun::Bsp(Bsp::new(params, BspConfig::default(), rng)),
            Self::Cave => MazeRun::Cave(Cave::new(params, CaveConfig::default(), rng)),
        }
    }
}

impl fmt::Display for MazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MazeAlgorithm {
    type Err = UnknownMazeAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMazeAlgorithm(s.to_string()))
    }
}

/// Error returned when parsing an unknown [`MazeAlgorithm`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMazeAlgorithm(pub String);

impl fmt::Display for UnknownMazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown maze generator \u{201c}{}\u{201d}, expected one of:", self.0)?;
        for a in MazeAlgorithm::ALL {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownMazeAlgorithm {}

/// A running generator of any kind.
pub enum MazeRun<R: Rng> {
    Backtracker(Backtracker<R>),
    Prim(Prim<R>),
    Bsp(Bsp<R>),
    Cave(Cave<R>),
}

impl<R: Rng> Iterator for MazeRun<R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        match self {
            Self::Backtracker(g) => g.next(),
            Self::Prim(g) => g.next(),
            Self::Bsp(g) => g.next(),
            Self::Cave(g) => g.next(),
        }
    }
}

/// Apply `step` to `grid`, turning its cells into passages.
///
/// Start and end cells keep their state; out-of-bounds cells are ignored.
/// Returns the number of cells whose state changed.
pub fn carve(grid: &mut Grid, step: &MazeStep) -> usize {
    let mut changed = 0;
    for &c in &step.cells_to_carve {
        let Some(n) = grid.at_mut(c) else {
            continue;
        };
        if !n.state.is_endpoint() && n.state != NodeState::Empty {
            n.state = NodeState::Empty;
            changed += 1;
        }
    }
    changed
}

/// L-shaped run of 4-connected cells from `from` to `to`.
pub(crate) fn l_path(from: Cell, to: Cell, horizontal_first: bool) -> Vec<Cell> {
    let corner = if horizontal_first {
        Cell::new(from.row, to.col)
    } else {
        Cell::new(to.row, from.col)
    };
    let mut cells = vec![from];
    for (a, b) in [(from, corner), (corner, to)] {
        let step = (b - a).signum();
        let mut c = a;
        while c != b {
            c = c + step;
            cells.push(c);
        }
    }
    cells
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use gridmaze_paths::Queue;

    /// Run `steps` to completion on a wall-filled grid sized for `params`.
    pub(crate) fn render(params: MazeParams, steps: impl IntoIterator<Item = MazeStep>) -> Grid {
        let mut grid = Grid::new(
            params.width + params.offset.col,
            params.height + params.offset.row,
        );
        grid.fill(NodeState::Wall);
        let mut seen = std::collections::HashSet::new();
        for step in steps {
            for &c in &step.cells_to_carve {
                assert!(seen.insert(c), "{c} carved twice");
            }
            carve(&mut grid, &step);
        }
        grid
    }

    /// Number of passage cells reachable from the first one.
    pub(crate) fn reachable(grid: &Grid) -> usize {
        let Some(first) = grid.nodes().iter().find(|n| n.state == NodeState::Empty) else {
            return 0;
        };
        let mut seen = vec![false; grid.len()];
        let mut queue = Queue::new();
        if let Some(i) = grid.index(first.cell) {
            seen[i] = true;
            queue.enqueue(first.cell);
        }
        let mut count = 0;
        while !queue.is_empty() {
            let c = queue.dequeue();
            count += 1;
            for n in c.neighbors_4() {
                let Some(i) = grid.index(n) else {
                    continue;
                };
                if !seen[i] && grid.state(n) == Some(NodeState::Empty) {
                    seen[i] = true;
                    queue.enqueue(n);
                }
            }
        }
        count
    }

    pub(crate) fn assert_connected(grid: &Grid) {
        let open = grid.count(NodeState::Empty);
        assert_eq!(reachable(grid), open, "passages are not connected:\n{grid}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn names_parse() {
        for a in MazeAlgorithm::ALL {
            assert_eq!(a.name().parse::<MazeAlgorithm>(), Ok(a));
        }
        let err = "kruskal".parse::<MazeAlgorithm>().unwrap_err();
        assert!(err.to_string().contains("kruskal"));
    }

    #[test]
    fn l_path_is_contiguous() {
        let a = Cell::new(1, 1);
        let b = Cell::new(4, 6);
        for horizontal_first in [true, false] {
            let p = l_path(a, b, horizontal_first);
            assert_eq!(p.first(), Some(&a));
            assert_eq!(p.last(), Some(&b));
            assert_eq!(p.len(), 3 + 5 + 1);
            for w in p.windows(2) {
                let d = w[1] - w[0];
                assert_eq!(d.row.abs() + d.col.abs(), 1);
            }
        }
        assert_eq!(l_path(a, a, true), vec![a]);
    }

    #[test]
    fn carve_keeps_endpoints() {
        let mut grid = Grid::parse("S##E").unwrap();
        let step = MazeStep {
            cells_to_carve: vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 3),
                Cell::new(3, 3),
            ],
        };
        assert_eq!(carve(&mut grid, &step), 1);
        assert_eq!(grid.to_string(), "S.#E");
        assert_eq!(carve(&mut grid, &step), 0);
    }

    #[test]
    fn every_generator_applies_offset() {
        let params = MazeParams::new(31, 21).with_offset(Cell::new(2, 3));
        for a in MazeAlgorithm::ALL {
            let run = a.execute(params, StdRng::seed_from_u64(3));
            let area = Rect::with_size(params.offset, params.width, params.height);
            let mut total = 0;
            for step in run {
                total += step.len();
                for c in step.cells_to_carve {
                    assert!(area.contains(c), "{a}: {c} outside {area}");
                }
            }
            assert!(total > 0, "{a} carved nothing");
        }
    }

    #[test]
    fn degenerate_areas_yield_nothing() {
        for a in MazeAlgorithm::ALL {
            for (w, h) in [(0, 0), (0, 5), (-3, 4)] {
                let mut run = a.execute(MazeParams::new(w, h), StdRng::seed_from_u64(0));
                assert_eq!(run.next(), None, "{a} on {w}x{h}");
            }
        }
    }

    #[test]
    fn bordered_params() {
        let grid = Grid::new(21, 11);
        let p = MazeParams::bordered(&grid);
        assert_eq!((p.width, p.height), (19, 9));
        assert_eq!(p.offset, Cell::new(1, 1));
    }
}
