use std::fmt;
use std::str::FromStr;

use gridmaze_core::{Cell, Distance, Grid, GridNode};
use rand::Rng;

use crate::heap::MinHeap;
use crate::traits::GridPather;

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// Output of a search, ready to be replayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    /// Nodes in the order they were settled/expanded.
    pub visited: Vec<GridNode>,
    /// Start to end inclusive; empty iff `found` is false.
    pub path: Vec<GridNode>,
    pub found: bool,
    /// Bidirectional searches only: start to meeting point, padded to the
    /// length of `path_from_end`.
    pub path_from_start: Vec<GridNode>,
    /// Bidirectional searches only: end to meeting point, padded to the
    /// length of `path_from_start`.
    pub path_from_end: Vec<GridNode>,
}

impl SearchResult {
    /// The empty, unsuccessful result.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Cells of `path`, in order.
    pub fn path_cells(&self) -> Vec<Cell> {
        self.path.iter().map(|n| n.cell).collect()
    }

    /// Cells of `visited`, in order.
    pub fn visited_cells(&self) -> Vec<Cell> {
        self.visited.iter().map(|n| n.cell).collect()
    }

    /// Total edge cost of `path` under `distance`.
    pub fn path_cost(&self, distance: Distance) -> f64 {
        self.path
            .windows(2)
            .map(|w| distance.calculate(w[0].cell, w[1].cell))
            .sum()
    }

    /// Whether this came from a bidirectional search.
    pub fn is_bidirectional(&self) -> bool {
        !self.path_from_start.is_empty() || !self.path_from_end.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Selector for the search strategies of [`PathFinder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dfs,
    GreedyDfs,
    Bfs,
    GreedyBestFirst,
    Dijkstra,
    AStar,
    BidirectionalBfs,
    BidirectionalAStar,
    Jps,
}

impl Algorithm {
    /// Every strategy, in menu order.
    pub const ALL: [Algorithm; 9] = [
        Self::Dfs,
        Self::GreedyDfs,
        Self::Bfs,
        Self::GreedyBestFirst,
        Self::Dijkstra,
        Self::AStar,
        Self::BidirectionalBfs,
        Self::BidirectionalAStar,
        Self::Jps,
    ];

    /// Short identifier, as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::GreedyDfs => "greedy-dfs",
            Self::Bfs => "bfs",
            Self::GreedyBestFirst => "greedy",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::BidirectionalBfs => "bi-bfs",
            Self::BidirectionalAStar => "bi-astar",
            Self::Jps => "jps",
        }
    }

    /// Whether the strategy guarantees a minimum-cost path.
    pub const fn is_optimal(self) -> bool {
        matches!(
            self,
            Self::Bfs | Self::Dijkstra | Self::AStar | Self::BidirectionalAStar | Self::Jps
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Error returned when parsing an unknown [`Algorithm`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm \u{201c}{}\u{201d}, expected one of:", self.0)?;
        for a in Algorithm::ALL {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownAlgorithm {}

// ---------------------------------------------------------------------------
// Internal heap entry
// ---------------------------------------------------------------------------

/// Reference into a grid arena, tagged with the key it was queued under.
///
/// Keys are snapshots: when a node is relaxed a new entry is pushed and the
/// old one goes stale, to be skipped when popped.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) key: f64,
}

pub(crate) type OpenList = MinHeap<NodeRef, fn(&NodeRef) -> f64>;

fn node_key(r: &NodeRef) -> f64 {
    r.key
}

pub(crate) fn open_list() -> OpenList {
    MinHeap::new(node_key as fn(&NodeRef) -> f64)
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Runs the search strategies.
///
/// Each strategy takes the grid **by value**: hand it a
/// [`Grid::snapshot`] so the search can write its bookkeeping without
/// touching the grid being displayed. The random source is only used by the
/// depth-first strategies.
pub struct PathFinder<R: Rng> {
    pub(crate) rng: R,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Cell>,
}

impl<R: Rng> PathFinder<R> {
    /// Create a path finder drawing randomness from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Run `algorithm` from `start` to `end` on `grid`.
    pub fn solve(
        &mut self,
        algorithm: Algorithm,
        grid: Grid,
        start: Cell,
        end: Cell,
        pather: &GridPather,
    ) -> SearchResult {
        match algorithm {
            Algorithm::Dfs => self.dfs(grid, start, end, pather),
            Algorithm::GreedyDfs => self.greedy_dfs(grid, start, end, pather),
            Algorithm::Bfs => self.bfs(grid, start, end, pather),
            Algorithm::GreedyBestFirst => self.greedy_best_first(grid, start, end, pather),
            Algorithm::Dijkstra => self.dijkstra(grid, start, end, pather),
            Algorithm::AStar => self.astar(grid, start, end, pather),
            Algorithm::BidirectionalBfs => self.bidirectional_bfs(grid, start, end, pather),
            Algorithm::BidirectionalAStar => self.bidirectional_astar(grid, start, end, pather),
            Algorithm::Jps => self.jps(grid, start, end, pather),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve both endpoints to arena indices.
///
/// Returns `None` for an empty grid or an out-of-bounds endpoint; searches
/// answer that with [`SearchResult::not_found`].
pub(crate) fn endpoints(grid: &Grid, start: Cell, end: Cell) -> Option<(usize, usize)> {
    if grid.is_empty() {
        log::debug!("search on an empty grid");
        return None;
    }
    let (Some(si), Some(gi)) = (grid.index(start), grid.index(end)) else {
        log::debug!("search endpoint out of bounds: {start} -> {end}");
        return None;
    };
    Some((si, gi))
}

/// Result for a search whose start is its goal.
pub(crate) fn single(grid: &Grid, idx: usize) -> SearchResult {
    let node = grid.node(idx).clone();
    SearchResult {
        visited: vec![node.clone()],
        path: vec![node],
        found: true,
        ..SearchResult::default()
    }
}

/// Mark `idx` explored in `grid` and record it.
pub(crate) fn settle(grid: &mut Grid, idx: usize, visited: &mut Vec<GridNode>) {
    let node = grid.node_mut(idx);
    node.mark_visited();
    visited.push(node.clone());
}

/// Follow `parent` links from `goal` and tag the chain as the solution.
pub(crate) fn solution(grid: &mut Grid, goal: usize) -> Vec<GridNode> {
    grid.trace_back(goal)
        .into_iter()
        .map(|i| {
            let node = grid.node_mut(i);
            node.mark_solution();
            node.clone()
        })
        .collect()
}

/// Assemble the final result and log the outcome.
pub(crate) fn finish(
    name: &str,
    visited: Vec<GridNode>,
    path: Option<Vec<GridNode>>,
) -> SearchResult {
    let found = path.is_some();
    let path = path.unwrap_or_default();
    log::debug!(
        "{name}: found={found} visited={} path={}",
        visited.len(),
        path.len()
    );
    SearchResult {
        visited,
        path,
        found,
        ..SearchResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_contiguous, finder, obstacle_course, walled_in_end};
    use gridmaze_core::{Adjacency, NodeState};
    use proptest::prelude::*;

    #[test]
    fn every_algorithm_reports_enclosed_end() {
        let (grid, start, end) = walled_in_end();
        for pather in [GridPather::four(), GridPather::eight()] {
            for a in Algorithm::ALL {
                let r = finder(1).solve(a, grid.clone(), start, end, &pather);
                assert!(!r.found, "{a} found a path to an enclosed end");
                assert!(r.path.is_empty(), "{a} returned a path");
            }
        }
    }

    #[test]
    fn every_algorithm_finds_contiguous_paths() {
        let (grid, start, end) = obstacle_course();
        for pather in [GridPather::four(), GridPather::eight()] {
            let best = finder(0).dijkstra(grid.clone(), start, end, &pather);
            let best = best.path_cost(pather.distance);
            for a in Algorithm::ALL {
                let r = finder(7).solve(a, grid.clone(), start, end, &pather);
                assert!(r.found, "{a} missed the path");
                assert_eq!(r.path.first().map(|n| n.cell), Some(start), "{a}");
                assert_eq!(r.path.last().map(|n| n.cell), Some(end), "{a}");
                assert_contiguous(&r, pather.adjacency);
                if a.is_optimal() && pather.adjacency == Adjacency::Four {
                    assert_eq!(r.path_cost(pather.distance), best, "{a} is not optimal");
                }
            }
        }
    }

    #[test]
    fn every_algorithm_handles_start_at_end() {
        let grid = Grid::new(3, 3);
        for a in Algorithm::ALL {
            let r = finder(0).solve(a, grid.clone(), Cell::new(1, 1), Cell::new(1, 1), &GridPather::four());
            assert!(r.found);
            assert_eq!(r.path_cells(), vec![Cell::new(1, 1)]);
        }
    }

    #[test]
    fn algorithm_names_parse() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
        assert!("A*".parse::<Algorithm>().is_err());
        assert_eq!("ASTAR".parse::<Algorithm>(), Ok(Algorithm::AStar));
    }

    #[test]
    fn unknown_algorithm_lists_choices() {
        let err = "nope".parse::<Algorithm>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("bi-astar"));
    }

    #[test]
    fn endpoints_guard() {
        let g = Grid::new(3, 3);
        assert_eq!(endpoints(&g, Cell::new(0, 0), Cell::new(2, 2)), Some((0, 8)));
        assert_eq!(endpoints(&g, Cell::new(0, 0), Cell::new(3, 2)), None);
        assert_eq!(endpoints(&Grid::new(0, 0), Cell::ZERO, Cell::ZERO), None);
    }

    #[test]
    fn solution_marks_chain() {
        let mut g = Grid::parse("S..E").unwrap();
        g.node_mut(1).parent = Some(0);
        g.node_mut(2).parent = Some(1);
        g.node_mut(3).parent = Some(2);
        let path = solution(&mut g, 3);
        let states: Vec<NodeState> = path.iter().map(|n| n.state).collect();
        assert_eq!(
            states,
            vec![
                NodeState::Start,
                NodeState::Solution,
                NodeState::Solution,
                NodeState::End
            ]
        );
    }

    #[test]
    fn path_cost_sums_edges() {
        let g = Grid::new(3, 3);
        let r = SearchResult {
            path: vec![
                g.node(0).clone(),
                g.node(4).clone(),
                g.node(5).clone(),
            ],
            found: true,
            ..SearchResult::default()
        };
        let c = r.path_cost(Distance::Euclidean);
        assert!((c - (std::f64::consts::SQRT_2 + 1.0)).abs() < 1e-9);
        assert_eq!(r.path_cells(), vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(1, 2)]);
    }

    /// Up to 12x12 grid with random walls and two distinct endpoints.
    fn walled_grid(
        w: i32,
        h: i32,
        walls: &[bool],
        s: prop::sample::Index,
        e: prop::sample::Index,
    ) -> (Grid, Cell, Cell) {
        let mut grid = Grid::new(w, h);
        for c in grid.bounds() {
            if walls[(c.row * 12 + c.col) as usize] {
                grid.set_state(c, NodeState::Wall);
            }
        }
        let start = grid.cell(s.index(grid.len()));
        let end = grid.cell(e.index(grid.len()));
        grid.set_state(start, NodeState::Start);
        grid.set_state(end, NodeState::End);
        (grid, start, end)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]

        #[test]
        fn random_walls_agree_with_dijkstra(
            w in 2i32..=12,
            h in 2i32..=12,
            walls in prop::collection::vec(prop::bool::weighted(0.3), 144),
            s in any::<prop::sample::Index>(),
            e in any::<prop::sample::Index>(),
            seed in any::<u64>(),
        ) {
            let (grid, start, end) = walled_grid(w, h, &walls, s, e);
            prop_assume!(start != end);
            for pather in [GridPather::four(), GridPather::eight()] {
                let best = finder(0).dijkstra(grid.clone(), start, end, &pather);
                let best_cost = best.path_cost(pather.distance);
                for a in Algorithm::ALL {
                    let r = finder(seed).solve(a, grid.clone(), start, end, &pather);
                    prop_assert_eq!(r.found, best.found, "{} disagrees on reachability", a);
                    if !r.found {
                        prop_assert!(r.path.is_empty());
                        continue;
                    }
                    prop_assert_eq!(r.path.first().map(|n| n.cell), Some(start));
                    prop_assert_eq!(r.path.last().map(|n| n.cell), Some(end));
                    for pair in r.path.windows(2) {
                        prop_assert!(pather.adjacency.is_step(pair[0].cell, pair[1].cell));
                        prop_assert!(!grid.is_wall(pair[1].cell));
                    }
                    // BFS minimises steps, which only matches cost without diagonals.
                    let cost_optimal = a.is_optimal()
                        && (pather.adjacency == Adjacency::Four || a != Algorithm::Bfs);
                    if cost_optimal {
                        let cost = r.path_cost(pather.distance);
                        prop_assert!(
                            (cost - best_cost).abs() < 1e-9,
                            "{}: cost {} vs {}",
                            a,
                            cost,
                            best_cost
                        );
                    }
                }
            }
        }
    }
}
