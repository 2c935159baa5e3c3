//! Randomized Prim's algorithm on the odd-coordinate sub-lattice.
//!
//! Keeps an explicit list of frontier walls. Each step takes one at random
//! and, if the cell beyond is still unvisited, carves through. The result
//! is a spanning tree with many short dead ends.

use gridmaze_core::Cell;
use rand::{Rng, RngExt};

use crate::backtracker::LATTICE_DIRS;
use crate::{MazeParams, MazeStep};

#[derive(Copy, Clone, Debug)]
struct Edge {
    wall: Cell,
    beyond: Cell,
}

/// Prim generator. Yields the start cell first, then one `[wall, cell]`
/// pair per carved edge.
pub struct Prim<R: Rng> {
    rng: R,
    params: MazeParams,
    visited: Vec<bool>,
    frontier: Vec<Edge>,
    started: bool,
}

impl<R: Rng> Prim<R> {
    pub fn new(params: MazeParams, rng: R) -> Self {
        Self {
            rng,
            params,
            visited: vec![false; params.len()],
            frontier: Vec::new(),
            started: false,
        }
    }

    fn visit(&mut self, c: Cell) {
        self.visited[self.params.index(c)] = true;
        let area = self.params.area();
        for d in LATTICE_DIRS {
            let beyond = c + d;
            if area.contains(beyond) && !self.visited[self.params.index(beyond)] {
                self.frontier.push(Edge {
                    wall: c.shift(d.row / 2, d.col / 2),
                    beyond,
                });
            }
        }
    }
}

impl<R: Rng> Iterator for Prim<R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        if !self.started {
            self.started = true;
            let start = self.params.random_odd_cell(&mut self.rng)?;
            self.visit(start);
            log::trace!("prim: start at {start}");
            return Some(MazeStep {
                cells_to_carve: vec![self.params.place(start)],
            });
        }

        while !self.frontier.is_empty() {
            let i = self.rng.random_range(0..self.frontier.len());
            let edge = self.frontier.swap_remove(i);
            if self.visited[self.params.index(edge.beyond)] {
                continue;
            }
            self.visit(edge.beyond);
            return Some(MazeStep {
                cells_to_carve: vec![
                    self.params.place(edge.wall),
                    self.params.place(edge.beyond),
                ],
            });
        }
        None
    }
}
