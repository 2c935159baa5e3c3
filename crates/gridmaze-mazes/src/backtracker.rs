//! Randomized depth-first backtracker.
//!
//! Works on the odd-coordinate sub-lattice so that every corridor keeps a
//! one-cell wall on each side. The walk carves a spanning tree: long,
//! winding corridors with few branches and no loops.

use gridmaze_core::Cell;
use gridmaze_paths::Stack;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{MazeParams, MazeStep};

/// Lattice moves: two cells in each cardinal direction.
pub(crate) const LATTICE_DIRS: [Cell; 4] = [
    Cell::new(0, -2),
    Cell::new(0, 2),
    Cell::new(-2, 0),
    Cell::new(2, 0),
];

/// Backtracker generator. Yields the start cell first, then one
/// `[wall, cell]` pair per carved move.
pub struct Backtracker<R: Rng> {
    rng: R,
    params: MazeParams,
    visited: Vec<bool>,
    stack: Stack<Cell>,
    started: bool,
}

impl<R: Rng> Backtracker<R> {
    pub fn new(params: MazeParams, rng: R) -> Self {
        Self {
            rng,
            params,
            visited: vec![false; params.len()],
            stack: Stack::new(),
            started: false,
        }
    }

    /// Unvisited lattice neighbour of `c`, in a fresh random direction order.
    fn pick(&mut self, c: Cell) -> Option<Cell> {
        let mut dirs = LATTICE_DIRS;
        dirs.shuffle(&mut self.rng);
        let area = self.params.area();
        dirs.into_iter()
            .map(|d| c + d)
            .find(|&n| area.contains(n) && !self.visited[self.params.index(n)])
    }
}

impl<R: Rng> Iterator for Backtracker<R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        if !self.started {
            self.started = true;
            let start = self.params.random_odd_cell(&mut self.rng)?;
            self.visited[self.params.index(start)] = true;
            self.stack.push(start);
            log::trace!("backtracker: start at {start}");
            return Some(MazeStep {
                cells_to_carve: vec![self.params.place(start)],
            });
        }

        while let Some(&top) = self.stack.peek() {
            match self.pick(top) {
                Some(next) => {
                    let wall = top.shift((next.row - top.row) / 2, (next.col - top.col) / 2);
                    self.visited[self.params.index(next)] = true;
                    self.stack.push(next);
                    return Some(MazeStep {
                        cells_to_carve: vec![self.params.place(wall), self.params.place(next)],
                    });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
