use gridmaze_core::{Cell, Grid};
use rand::Rng;

use crate::pathfinder::{PathFinder, SearchResult, endpoints, finish, settle, single, solution};
use crate::queue::Queue;
use crate::traits::Pather;

impl<R: Rng> PathFinder<R> {
    /// Breadth-first search.
    ///
    /// Every step has cost 1 and the frontier is FIFO, so the path has the
    /// minimum number of edges. `visited` is the dequeue order.
    pub fn bfs<P: Pather>(
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
        let mut queue: Queue<usize> = Queue::new();

        discovered[si] = true;
        grid.node_mut(si).g = 0.0;
        queue.enqueue(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while !queue.is_empty() {
            let ci = queue.dequeue();
            settle(&mut grid, ci, &mut visited);
            if ci == gi {
                found = true;
                break;
            }

            let cp = grid.cell(ci);
            let next_g = grid.node(ci).g + 1.0;
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
                n.g = next_g;
                queue.enqueue(ni);
            }
        }

        self.nbuf = nbuf;
        let path = found.then(|| solution(&mut grid, gi));
        finish("bfs", visited, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_contiguous, assert_unique_visited, finder, gap_wall, walled_in_end};
    use crate::traits::GridPather;

    #[test]
    fn bfs_path_length_on_empty_grid() {
        for (w, h) in [(5, 5), (8, 3), (1, 6)] {
            let grid = Grid::new(w, h);
            let r = finder(0).bfs(
                grid,
                Cell::new(0, 0),
                Cell::new(h - 1, w - 1),
                &GridPather::four(),
            );
            assert!(r.found);
            assert_eq!(r.path.len(), ((w - 1) + (h - 1) + 1) as usize);
            assert!(r.visited.len() <= (w * h) as usize);
        }
    }

    #[test]
    fn bfs_five_by_five_scenario() {
        let r = finder(0).bfs(
            Grid::new(5, 5),
            Cell::new(0, 0),
            Cell::new(4, 4),
            &GridPather::four(),
        );
        assert_eq!(r.path.len(), 9);
        assert!(r.visited.len() <= 25);
        assert_unique_visited(&r);
        assert_contiguous(&r, GridPather::four().adjacency);
    }

    #[test]
    fn bfs_goes_through_the_gap() {
        let r = finder(0).bfs(gap_wall(), Cell::new(0, 0), Cell::new(0, 4), &GridPather::four());
        assert!(r.found);
        assert!(r.path_cells().contains(&Cell::new(2, 2)));
        assert_eq!(r.path.len(), 9);
    }

    #[test]
    fn bfs_enclosed_end() {
        let (grid, start, end) = walled_in_end();
        let r = finder(0).bfs(grid, start, end, &GridPather::four());
        assert!(!r.found);
        assert!(r.path.is_empty());
        assert!(!r.visited.is_empty());
    }

    #[test]
    fn bfs_out_of_bounds_guard() {
        let r = finder(0).bfs(Grid::new(3, 3), Cell::new(0, 0), Cell::new(9, 9), &GridPather::four());
        assert_eq!(r, SearchResult::not_found());
    }

    #[test]
    fn bfs_start_is_end() {
        let r = finder(0).bfs(Grid::new(3, 3), Cell::new(1, 1), Cell::new(1, 1), &GridPather::four());
        assert!(r.found);
        assert_eq!(r.path_cells(), vec![Cell::new(1, 1)]);
    }

    #[test]
    fn bfs_eight_way_takes_diagonals() {
        let r = finder(0).bfs(
            Grid::new(5, 5),
            Cell::new(0, 0),
            Cell::new(4, 4),
            &GridPather::eight(),
        );
        assert_eq!(r.path.len(), 5);
        assert_contiguous(&r, GridPather::eight().adjacency);
    }
}
