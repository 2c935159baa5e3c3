//! Turning a [`SearchResult`] into an ordered list of cell repaints.
//!
//! A [`ReplayPlan`] is what a renderer pulls from, one [`ReplayFrame`] at a
//! time, usually through [`gridmaze_core::drive`]. Visited cells come first,
//! then the solution. For bidirectional results the two solution halves are
//! interleaved so both grow in lockstep.

use gridmaze_core::{Cell, Grid, GridNode, NodeState};

use crate::pathfinder::SearchResult;

/// One repaint: set `cell` to `state`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayFrame {
    pub cell: Cell,
    pub state: NodeState,
}

/// Ordered frames for animating one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayPlan {
    frames: Vec<ReplayFrame>,
    visited: usize,
}

impl ReplayPlan {
    /// Build the plan for `result`.
    ///
    /// Nodes whose state is `Start` or `End` are skipped so the endpoints
    /// keep their own look. Padding repeats in bidirectional halves are kept;
    /// they hold one side still while the other catches up.
    pub fn from_result(result: &SearchResult) -> Self {
        let mut frames = Vec::with_capacity(result.visited.len() + result.path.len());
        push_nodes(&mut frames, &result.visited, NodeState::Visited);
        let visited = frames.len();

        if result.is_bidirectional() {
            for (a, b) in result.path_from_start.iter().zip(&result.path_from_end) {
                push_nodes(&mut frames, [a, b], NodeState::Solution);
            }
        } else {
            push_nodes(&mut frames, &result.path, NodeState::Solution);
        }

        log::debug!(
            "replay plan: {} visited frames, {} solution frames",
            visited,
            frames.len() - visited
        );
        Self { frames, visited }
    }

    /// All frames, in order.
    #[inline]
    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    /// The exploration part of the plan.
    #[inline]
    pub fn visited(&self) -> &[ReplayFrame] {
        &self.frames[..self.visited]
    }

    /// The solution part of the plan.
    #[inline]
    pub fn solution(&self) -> &[ReplayFrame] {
        &self.frames[self.visited..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl IntoIterator for ReplayPlan {
    type Item = ReplayFrame;
    type IntoIter = std::vec::IntoIter<ReplayFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReplayPlan {
    type Item = &'a ReplayFrame;
    type IntoIter = std::slice::Iter<'a, ReplayFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn push_nodes<'a>(
    frames: &mut Vec<ReplayFrame>,
    nodes: impl IntoIterator<Item = &'a GridNode>,
    state: NodeState,
) {
    frames.extend(
        nodes
            .into_iter()
            .filter(|n| !n.state.is_endpoint())
            .map(|n| ReplayFrame {
                cell: n.cell,
                state,
            }),
    );
}

/// Paint `frame` onto `grid`.
///
/// Returns `false` and leaves the grid alone when the cell is out of bounds,
/// a wall, or an endpoint.
pub fn apply_frame(grid: &mut Grid, frame: ReplayFrame) -> bool {
    match grid.at_mut(frame.cell) {
        Some(n) if n.state != NodeState::Wall && !n.state.is_endpoint() => {
            n.state = frame.state;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{finder, gap_wall};
    use crate::traits::GridPather;
    use gridmaze_core::{CancelToken, DriveOutcome, Throttle, drive};

    #[test]
    fn unidirectional_plan_order() {
        let grid = Grid::parse("S..E").unwrap();
        let r = finder(0).bfs(grid, Cell::new(0, 0), Cell::new(0, 3), &GridPather::four());
        let plan = ReplayPlan::from_result(&r);
        let visited: Vec<Cell> = plan.visited().iter().map(|f| f.cell).collect();
        assert_eq!(visited, vec![Cell::new(0, 1), Cell::new(0, 2)]);
        assert!(plan.visited().iter().all(|f| f.state == NodeState::Visited));
        let solution: Vec<Cell> = plan.solution().iter().map(|f| f.cell).collect();
        assert_eq!(solution, vec![Cell::new(0, 1), Cell::new(0, 2)]);
        assert!(plan.solution().iter().all(|f| f.state == NodeState::Solution));
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn bidirectional_plan_interleaves() {
        let grid = gap_wall();
        let r = finder(0).bidirectional_bfs(
            grid,
            Cell::new(0, 0),
            Cell::new(0, 4),
            &GridPather::four(),
        );
        let plan = ReplayPlan::from_result(&r);
        let sol = plan.solution();
        // First pair: the steps right after each endpoint.
        assert_eq!(sol[0].cell, r.path_from_start[1].cell);
        assert_eq!(sol[1].cell, r.path_from_end[1].cell);
        // Every path cell other than the endpoints is painted.
        for c in &r.path_cells()[1..r.path.len() - 1] {
            assert!(sol.iter().any(|f| f.cell == *c), "{c} not painted");
        }
    }

    #[test]
    fn not_found_plan_has_no_solution() {
        let plan = ReplayPlan::from_result(&SearchResult::not_found());
        assert!(plan.is_empty());
        assert!(plan.solution().is_empty());
    }

    #[test]
    fn apply_respects_terrain() {
        let mut grid = Grid::parse("S.#E").unwrap();
        let paint = |cell| ReplayFrame {
            cell,
            state: NodeState::Visited,
        };
        assert!(apply_frame(&mut grid, paint(Cell::new(0, 1))));
        assert!(!apply_frame(&mut grid, paint(Cell::new(0, 0))));
        assert!(!apply_frame(&mut grid, paint(Cell::new(0, 2))));
        assert!(!apply_frame(&mut grid, paint(Cell::new(0, 3))));
        assert!(!apply_frame(&mut grid, paint(Cell::new(5, 5))));
        assert_eq!(grid.to_string(), "Sv#E");
    }

    #[test]
    fn replay_through_driver() {
        let live = gap_wall();
        let r = finder(0).astar(
            live.snapshot(),
            Cell::new(0, 0),
            Cell::new(0, 4),
            &GridPather::four(),
        );
        let plan = ReplayPlan::from_result(&r);
        let total = plan.len();

        let mut live = live;
        let token = CancelToken::new();
        let mut frames = 0;
        let out = drive(plan, Throttle::new(4), &token, || frames += 1, |f| {
            apply_frame(&mut live, f);
        });
        assert_eq!(out, DriveOutcome::Completed { steps: total });
        assert_eq!(frames, total.div_ceil(4));
        assert_eq!(live.count(NodeState::Solution), r.path.len() - 2);
    }

    #[test]
    fn cancelled_replay_stops_early() {
        let r = finder(0).bfs(Grid::new(6, 6), Cell::new(0, 0), Cell::new(5, 5), &GridPather::four());
        let plan = ReplayPlan::from_result(&r);
        let mut live = Grid::new(6, 6);
        let token = CancelToken::new();
        let cancel = token.clone();
        let mut applied = 0;
        let out = drive(&plan, Throttle::new(1), &token, || {}, |f| {
            apply_frame(&mut live, *f);
            applied += 1;
            if applied == 5 {
                cancel.cancel();
            }
        });
        assert_eq!(out, DriveOutcome::Cancelled { steps: 5 });
        assert_eq!(live.count(NodeState::Visited), 5);
    }
}
