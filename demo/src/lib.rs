//! Scene setup for the `mazeviz` terminal demo.
//!
//! Generates a maze, picks endpoints on it and solves it; the binary adds
//! the terminal and the animation on top.

pub mod screen;

use gridmaze_core::{Cell, Grid, NodeState};
use gridmaze_mazes::{MazeAlgorithm, MazeParams, MazeRun};
use gridmaze_paths::GridPather;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Smallest side the demo accepts.
pub const MIN_SIDE: i32 = 7;

/// Clamp requested dimensions to what fits, and make them odd so lattice
/// mazes close cleanly on every side.
///
/// Returns `None` when `max` cannot hold a [`MIN_SIDE`] square.
pub fn fit_dimensions(width: i32, height: i32, max: (i32, i32)) -> Option<(i32, i32)> {
    if max.0 < MIN_SIDE || max.1 < MIN_SIDE {
        return None;
    }
    let fit = |want: i32, max: i32| {
        let v = want.clamp(MIN_SIDE, max);
        if v % 2 == 0 { v - 1 } else { v }
    };
    Some((fit(width, max.0), fit(height, max.1)))
}

/// A wall-filled grid and a generator run that carves inside its border.
pub fn maze_run(width: i32, height: i32, maze: MazeAlgorithm, seed: u64) -> (Grid, MazeRun<StdRng>) {
    let mut grid = Grid::new(width, height);
    grid.fill(NodeState::Wall);
    let run = maze.execute(MazeParams::bordered(&grid), StdRng::seed_from_u64(seed));
    (grid, run)
}

/// Mark the first and last passage cells (row-major) as start and end.
///
/// Returns `None` when the grid has fewer than two passage cells.
pub fn place_endpoints(grid: &mut Grid) -> Option<(Cell, Cell)> {
    let mut open = grid
        .nodes()
        .iter()
        .filter(|n| n.state == NodeState::Empty)
        .map(|n| n.cell);
    let start = open.next()?;
    let end = open.last()?;
    grid.set_state(start, NodeState::Start);
    grid.set_state(end, NodeState::End);
    Some((start, end))
}

/// The pather for the requested movement.
pub fn pather(diagonal: bool) -> GridPather {
    if diagonal {
        GridPather::eight()
    } else {
        GridPather::four()
    }
}
