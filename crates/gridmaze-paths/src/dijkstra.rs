use gridmaze_core::{Cell, Grid};
use rand::Rng;

use crate::pathfinder::{
    NodeRef, PathFinder, SearchResult, endpoints, finish, open_list, settle, single, solution,
};
use crate::traits::WeightedPather;

impl<R: Rng> PathFinder<R> {
    /// Dijkstra's algorithm: expand the open node with the smallest cost
    /// from start, relaxing neighbors whose cost improves.
    ///
    /// Optimal for the pather's edge costs.
    pub fn dijkstra<P: WeightedPather>(
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

        {
            let n = grid.node_mut(si);
            n.g = 0.0;
            n.f = 0.0;
        }
        open.insert(NodeRef { idx: si, key: 0.0 });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while !open.is_empty() {
            let ci = open.extract_min().idx;
            // Skip stale entries.
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
                let tentative = current_g + pather.cost(cp, np);
                let n = grid.node_mut(ni);
                if tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                n.f = tentative;
                n.parent = Some(ci);
                open.insert(NodeRef {
                    idx: ni,
                    key: tentative,
                });
            }
        }

        self.nbuf = nbuf;
        let path = found.then(|| solution(&mut grid, gi));
        finish("dijkstra", visited, path)
    }
}
