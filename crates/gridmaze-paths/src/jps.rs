//! Jump Point Search (JPS) on uniform-cost grids.
//!
//! JPS is an A* variant that only inserts *jump points* into the open list:
//! cells where a straight-line scan hits the goal or exposes a forced
//! neighbour. The intermediate cells of each jump are filled back in when
//! the path is reconstructed.
//!
//! With [`Adjacency::Four`] a horizontal scan stops beside an opening that is
//! closed one step behind, and a vertical scan stops wherever a horizontal
//! sub-scan finds a jump point. With [`Adjacency::Eight`] diagonals are only
//! taken when both cardinal cells beside the step are open, matching
//! [`Adjacency::push_neighbors`].

use gridmaze_core::{Adjacency, Cell, Grid};
use rand::Rng;

use crate::pathfinder::{
    NodeRef, PathFinder, SearchResult, endpoints, finish, open_list, settle, single,
};
use crate::traits::GridPather;

/// Read-only view used while scanning.
///
/// A cell is walkable when it is in bounds and not a wall; unlike the
/// generic neighbour function this lets the start cell take part in
/// forced-neighbour checks.
struct Jumper<'a> {
    grid: &'a Grid,
    adjacency: Adjacency,
    goal: Cell,
}

impl Jumper<'_> {
    #[inline]
    fn walkable(&self, c: Cell) -> bool {
        self.grid.contains(c) && !self.grid.is_wall(c)
    }

    /// Directions worth scanning from `c`, given the direction `d` it was
    /// entered from (`None` for the start cell).
    fn directions(&self, c: Cell, d: Option<Cell>) -> Vec<Cell> {
        let mut dirs = Vec::with_capacity(8);
        let open = |dr: i32, dc: i32| self.walkable(c.shift(dr, dc));
        let mut push = |dr: i32, dc: i32| dirs.push(Cell::new(dr, dc));

        let Some(d) = d else {
            for n in c.neighbors_4() {
                if self.walkable(n) {
                    let s = n - c;
                    push(s.row, s.col);
                }
            }
            if self.adjacency == Adjacency::Eight {
                for (dr, dc) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
                    if open(dr, 0) && open(0, dc) && open(dr, dc) {
                        push(dr, dc);
                    }
                }
            }
            return dirs;
        };

        match self.adjacency {
            Adjacency::Four => {
                if d.col != 0 {
                    if open(-1, 0) {
                        push(-1, 0);
                    }
                    if open(1, 0) {
                        push(1, 0);
                    }
                    if open(0, d.col) {
                        push(0, d.col);
                    }
                } else {
                    if open(0, -1) {
                        push(0, -1);
                    }
                    if open(0, 1) {
                        push(0, 1);
                    }
                    if open(d.row, 0) {
                        push(d.row, 0);
                    }
                }
            }
            Adjacency::Eight => {
                if d.row != 0 && d.col != 0 {
                    let vertical = open(d.row, 0);
                    let horizontal = open(0, d.col);
                    if vertical {
                        push(d.row, 0);
                    }
                    if horizontal {
                        push(0, d.col);
                    }
                    if vertical && horizontal {
                        push(d.row, d.col);
                    }
                } else if d.col != 0 {
                    let next = open(0, d.col);
                    let below = open(1, 0);
                    let above = open(-1, 0);
                    if next {
                        push(0, d.col);
                        if below {
                            push(1, d.col);
                        }
                        if above {
                            push(-1, d.col);
                        }
                    }
                    if below {
                        push(1, 0);
                    }
                    if above {
                        push(-1, 0);
                    }
                } else {
                    let next = open(d.row, 0);
                    let right = open(0, 1);
                    let left = open(0, -1);
                    if next {
                        push(d.row, 0);
                        if right {
                            push(d.row, 1);
                        }
                        if left {
                            push(d.row, -1);
                        }
                    }
                    if right {
                        push(0, 1);
                    }
                    if left {
                        push(0, -1);
                    }
                }
            }
        }
        dirs
    }

    /// Scan from `from` along `dir` and return the first jump point, or
    /// `None` on a wall or the grid edge.
    fn jump(&self, from: Cell, dir: Cell) -> Option<Cell> {
        let mut c = from + dir;
        loop {
            if !self.walkable(c) {
                return None;
            }
            if c == self.goal {
                return Some(c);
            }

            let open = |dr: i32, dc: i32| self.walkable(c.shift(dr, dc));
            if dir.row != 0 && dir.col != 0 {
                if self.jump(c, Cell::new(0, dir.col)).is_some()
                    || self.jump(c, Cell::new(dir.row, 0)).is_some()
                {
                    return Some(c);
                }
            } else if dir.col != 0 {
                if (open(-1, 0) && !open(-1, -dir.col)) || (open(1, 0) && !open(1, -dir.col)) {
                    return Some(c);
                }
            } else {
                if (open(0, -1) && !open(-dir.row, -1)) || (open(0, 1) && !open(-dir.row, 1)) {
                    return Some(c);
                }
                if self.adjacency == Adjacency::Four
                    && (self.jump(c, Cell::new(0, 1)).is_some()
                        || self.jump(c, Cell::new(0, -1)).is_some())
                {
                    return Some(c);
                }
            }

            // A diagonal step needs both cardinals beside it open.
            if self.adjacency == Adjacency::Eight && !(open(dir.row, 0) && open(0, dir.col)) {
                return None;
            }
            c = c + dir;
        }
    }
}

/// Expand a chain of jump points into single steps.
fn interpolate(points: &[Cell]) -> Vec<Cell> {
    let mut cells = Vec::new();
    for w in points.windows(2) {
        let step = (w[1] - w[0]).signum();
        let mut c = w[0];
        while c != w[1] {
            cells.push(c);
            c = c + step;
        }
    }
    cells.extend(points.last());
    cells
}

impl<R: Rng> PathFinder<R> {
    /// Jump Point Search from `start` to `end`.
    ///
    /// Edge costs and the heuristic both come from `pather.distance`; only
    /// settled jump points are reported in `visited`.
    pub fn jps(&mut self, mut grid: Grid, start: Cell, end: Cell, pather: &GridPather) -> SearchResult {
        let Some((si, gi)) = endpoints(&grid, start, end) else {
            return SearchResult::not_found();
        };
        if si == gi {
            return single(&grid, si);
        }
        if grid.is_wall(end) {
            log::debug!("jps: end {end} is a wall");
            return finish("jps", Vec::new(), None);
        }

        grid.reset_search();
        let distance = pather.distance;
        let mut open = open_list();
        let mut closed = vec![false; grid.len()];
        let mut visited = Vec::new();
        {
            let n = grid.node_mut(si);
            n.g = 0.0;
            n.h = distance.calculate(start, end);
            n.f = n.h;
            open.insert(NodeRef { idx: si, key: n.f });
        }

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
            let cur_g = grid.node(ci).g;
            let entered = grid.node(ci).parent.map(|p| (cp - grid.cell(p)).signum());
            let jumps: Vec<Cell> = {
                let jumper = Jumper {
                    grid: &grid,
                    adjacency: pather.adjacency,
                    goal: end,
                };
                jumper
                    .directions(cp, entered)
                    .into_iter()
                    .filter_map(|d| jumper.jump(cp, d))
                    .collect()
            };
            log::trace!("jps: {cp} -> {} jump points", jumps.len());

            for jp in jumps {
                let Some(ji) = grid.index(jp) else {
                    continue;
                };
                if closed[ji] {
                    continue;
                }
                let tentative = cur_g + distance.calculate(cp, jp);
                let n = grid.node_mut(ji);
                if tentative >= n.g {
                    continue;
                }
                if n.parent.is_none() {
                    n.h = distance.calculate(jp, end);
                }
                n.g = tentative;
                n.f = tentative + n.h;
                n.parent = Some(ci);
                open.insert(NodeRef { idx: ji, key: n.f });
            }
        }

        let path = found.then(|| {
            let points: Vec<Cell> = grid
                .trace_back(gi)
                .into_iter()
                .map(|i| grid.cell(i))
                .collect();
            let mut prev: Option<usize> = None;
            let mut path = Vec::new();
            for c in interpolate(&points) {
                let Some(i) = grid.index(c) else {
                    continue;
                };
                if let Some(p) = prev {
                    let g = grid.node(p).g + distance.calculate(grid.cell(p), c);
                    let n = grid.node_mut(i);
                    n.parent = Some(p);
                    n.g = g;
                }
                let n = grid.node_mut(i);
                n.mark_solution();
                path.push(n.clone());
                prev = Some(i);
            }
            path
        });
        finish("jps", visited, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        assert_contiguous, assert_unique_visited, assert_walkable, finder, gap_wall,
        obstacle_course, walled_in_end,
    };
    use gridmaze_core::NodeState;

    #[test]
    fn interpolate_fills_gaps() {
        let pts = [Cell::new(0, 0), Cell::new(0, 3), Cell::new(2, 5)];
        assert_eq!(
            interpolate(&pts),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(0, 3),
                Cell::new(1, 4),
                Cell::new(2, 5),
            ]
        );
        assert!(interpolate(&[]).is_empty());
    }

    #[test]
    fn open_grid_four() {
        let pather = GridPather::four();
        let r = finder(0).jps(Grid::new(5, 5), Cell::new(0, 0), Cell::new(4, 4), &pather);
        assert!(r.found);
        assert_eq!(r.path.len(), 9);
        assert!(r.visited.len() <= 25);
        assert_contiguous(&r, pather.adjacency);
        assert_unique_visited(&r);
    }

    #[test]
    fn open_grid_eight_goes_diagonal() {
        let pather = GridPather::eight();
        let r = finder(0).jps(Grid::new(5, 5), Cell::new(0, 0), Cell::new(4, 4), &pather);
        assert!(r.found);
        assert_eq!(
            r.path_cells(),
            (0..5).map(|i| Cell::new(i, i)).collect::<Vec<_>>()
        );
        // Only the start and the goal are ever settled.
        assert_eq!(r.visited.len(), 2);
    }

    #[test]
    fn passes_through_gap() {
        let grid = gap_wall();
        let pather = GridPather::four();
        let r = finder(0).jps(grid.clone(), Cell::new(0, 0), Cell::new(0, 4), &pather);
        assert!(r.found);
        assert_eq!(r.path.len(), 9);
        assert!(r.path_cells().contains(&Cell::new(2, 2)));
        assert_contiguous(&r, pather.adjacency);
        assert_walkable(&r, &grid);
        assert_eq!(r.path[0].state, NodeState::Start);
        assert_eq!(r.path[4].state, NodeState::Solution);
    }

    #[test]
    fn four_way_cost_matches_dijkstra() {
        let pather = GridPather::four();
        let (course, cs, ce) = obstacle_course();
        let cases = [
            (Grid::new(5, 5), Cell::new(0, 0), Cell::new(4, 4)),
            (gap_wall(), Cell::new(0, 0), Cell::new(0, 4)),
            (course, cs, ce),
        ];
        for (grid, start, end) in cases {
            let j = finder(0).jps(grid.clone(), start, end, &pather);
            let d = finder(0).dijkstra(grid.clone(), start, end, &pather);
            assert!(j.found && d.found);
            assert_eq!(j.path.len(), d.path.len());
            assert_eq!(j.path_cost(pather.distance), d.path_cost(pather.distance));
            assert_contiguous(&j, pather.adjacency);
            assert_walkable(&j, &grid);
            assert_unique_visited(&j);
        }
    }

    #[test]
    fn eight_way_obstacle_course() {
        let pather = GridPather::eight();
        let (grid, start, end) = obstacle_course();
        let r = finder(0).jps(grid.clone(), start, end, &pather);
        assert!(r.found);
        assert_eq!(r.path.first().map(|n| n.cell), Some(start));
        assert_eq!(r.path.last().map(|n| n.cell), Some(end));
        assert_contiguous(&r, pather.adjacency);
        assert_walkable(&r, &grid);
        assert_unique_visited(&r);
    }

    #[test]
    fn enclosed_end() {
        let (grid, start, end) = walled_in_end();
        for pather in [GridPather::four(), GridPather::eight()] {
            let r = finder(0).jps(grid.clone(), start, end, &pather);
            assert!(!r.found);
            assert!(r.path.is_empty());
            assert_unique_visited(&r);
        }
    }

    #[test]
    fn wall_end() {
        let grid = Grid::parse("S.#").unwrap();
        let r = finder(0).jps(grid, Cell::new(0, 0), Cell::new(0, 2), &GridPather::four());
        assert!(!r.found);
    }
}
