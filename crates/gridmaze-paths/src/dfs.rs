//! Depth-first search, plain and heuristic-ordered.

use gridmaze_core::{Cell, Grid};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::pathfinder::{PathFinder, SearchResult, endpoints, finish, settle, single, solution};
use crate::queue::Stack;
use crate::traits::AstarPather;

/// One level of the (explicit) recursion: a node and the neighbors it has
/// yet to try, in order.
struct Frame {
    idx: usize,
    next: Vec<usize>,
    pos: usize,
}

impl<R: Rng> PathFinder<R> {
    /// Depth-first search with neighbors tried in random order.
    ///
    /// The first visit to a node wins; the resulting path is valid but not
    /// necessarily short.
    pub fn dfs<P: AstarPather>(
        &mut self,
        grid: Grid,
        start: Cell,
        end: Cell,
        pather: &P,
    ) -> SearchResult {
        self.depth_first("dfs", grid, start, end, pather, false)
    }

    /// Depth-first search that tries neighbors closest to `end` first
    /// (random tie-break). Not optimal, but usually short.
    pub fn greedy_dfs<P: AstarPather>(
        &mut self,
        grid: Grid,
        start: Cell,
        end: Cell,
        pather: &P,
    ) -> SearchResult {
        self.depth_first("greedy-dfs", grid, start, end, pather, true)
    }

    fn depth_first<P: AstarPather>(
        &mut self,
        name: &str,
        mut grid: Grid,
        start: Cell,
        end: Cell,
        pather: &P,
        greedy: bool,
    ) -> SearchResult {
        let Some((si, gi)) = endpoints(&grid, start, end) else {
            return SearchResult::not_found();
        };
        if si == gi {
            return single(&grid, si);
        }
        grid.reset_search();

        let mut closed = vec![false; grid.len()];
        let mut visited = Vec::new();
        let mut stack: Stack<Frame> = Stack::new();

        closed[si] = true;
        grid.node_mut(si).g = 0.0;
        settle(&mut grid, si, &mut visited);
        let next = self.ordered_neighbors(&mut grid, si, end, pather, greedy);
        stack.push(Frame {
            idx: si,
            next,
            pos: 0,
        });

        let mut found = false;
        while !stack.is_empty() {
            let Some(frame) = stack.peek_mut() else {
                break;
            };
            if frame.pos >= frame.next.len() {
                stack.pop();
                continue;
            }
            let ni = frame.next[frame.pos];
            frame.pos += 1;
            let ci = frame.idx;
            if closed[ni] {
                continue;
            }

            closed[ni] = true;
            let g = grid.node(ci).g + pather.cost(grid.cell(ci), grid.cell(ni));
            let n = grid.node_mut(ni);
            n.parent = Some(ci);
            n.g = g;
            settle(&mut grid, ni, &mut visited);
            log::trace!("{name}: enter {}", grid.cell(ni));

            if ni == gi {
                found = true;
                break;
            }
            let next = self.ordered_neighbors(&mut grid, ni, end, pather, greedy);
            stack.push(Frame {
                idx: ni,
                next,
                pos: 0,
            });
        }

        let path = found.then(|| solution(&mut grid, gi));
        finish(name, visited, path)
    }

    /// Neighbors of `idx` as arena indices: shuffled, then (if `greedy`)
    /// stably sorted by heuristic so ties keep their random order.
    fn ordered_neighbors<P: AstarPather>(
        &mut self,
        grid: &mut Grid,
        idx: usize,
        end: Cell,
        pather: &P,
        greedy: bool,
    ) -> Vec<usize> {
        self.nbuf.clear();
        pather.neighbors(grid, grid.cell(idx), &mut self.nbuf);
        self.nbuf.shuffle(&mut self.rng);

        let mut next: Vec<usize> = self.nbuf.iter().filter_map(|&c| grid.index(c)).collect();
        if greedy {
            for &ni in &next {
                let n = grid.node_mut(ni);
                n.h = pather.estimate(n.cell, end);
            }
            next.sort_by(|&a, &b| grid.node(a).h.total_cmp(&grid.node(b).h));
        }
        next
    }
}
