use gridmaze_core::{Cell, Grid};
use rand::Rng;

use crate::pathfinder::{
    NodeRef, PathFinder, SearchResult, endpoints, finish, open_list, settle, single, solution,
};
use crate::traits::AstarPather;

impl<R: Rng> PathFinder<R> {
    /// Compute the shortest path from `start` to `end` using A*.
    ///
    /// The open list is ordered by `f = g + h`; a node is settled once and
    /// its cost is never relaxed after that. Optimal when the pather's
    /// heuristic is admissible and consistent.
    pub fn astar<P: AstarPather>(
        &mut self,
        mut grid: Grid,
        start: Cell,
        end: Cell,
        pather: &P,
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
        let mut open = open_list();

        // Initialise the start node.
        {
            let n = grid.node_mut(si);
            n.g = 0.0;
            n.h = pather.estimate(start, end);
            n.f = n.h;
            open.insert(NodeRef { idx: si, key: n.f });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while !open.is_empty() {
            let ci = open.extract_min().idx;
            if closed[ci] {
                continue;
            }
            closed[ci] = true;
            settle(&mut grid, ci, &mut visited);
            if ci == gi {
                found = true;
                break;
            }

            let cp = grid.cell(ci);
            let current_g = grid.node(ci).g;
            nbuf.clear();
            pather.neighbors(&grid, cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if closed[ni] {
                    continue;
                }
                let tentative_g = current_g + pather.cost(cp, np);
                let n = grid.node_mut(ni);
                if tentative_g >= n.g {
                    continue;
                }
                if n.parent.is_none() {
                    n.h = pather.estimate(np, end);
                }
                n.g = tentative_g;
                n.f = tentative_g + n.h;
                n.parent = Some(ci);
                open.insert(NodeRef { idx: ni, key: n.f });
            }
        }

        self.nbuf = nbuf;
        let path = found.then(|| solution(&mut grid, gi));
        finish("astar", visited, path)
    }
}
