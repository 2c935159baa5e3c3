use gridmaze_core::{Cell, Grid};
use rand::Rng;

use crate::pathfinder::{
    NodeRef, PathFinder, SearchResult, endpoints, finish, open_list, settle, single, solution,
};
use crate::traits::AstarPather;

impl<R: Rng> PathFinder<R> {
    /// Greedy best-first search: always expand the open node with the
    /// smallest heuristic.
    ///
    /// Each node is queued at most once and never re-expanded, so the path
    /// is not necessarily optimal.
    pub fn greedy_best_first<P: AstarPather>(
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

        let mut discovered = vec![false; grid.len()];
        let mut visited = Vec::new();
        let mut open = open_list();

        {
            let n = grid.node_mut(si);
            n.g = 0.0;
            n.h = pather.estimate(start, end);
            n.f = n.h;
            discovered[si] = true;
            open.insert(NodeRef { idx: si, key: n.h });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while !open.is_empty() {
            let ci = open.extract_min().idx;
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
                if discovered[ni] {
                    continue;
                }
                discovered[ni] = true;
                let n = grid.node_mut(ni);
                n.parent = Some(ci);
                n.g = current_g + pather.cost(cp, np);
                n.h = pather.estimate(np, end);
                n.f = n.h;
                open.insert(NodeRef { idx: ni, key: n.h });
            }
        }

        self.nbuf = nbuf;
        let path = found.then(|| solution(&mut grid, gi));
        finish("greedy", visited, path)
    }
}
