//! Bidirectional searches.
//!
//! Both strategies grow one frontier from `start` and one from `end`. Each
//! frontier works on its own copy of the grid, so the two `parent` chains
//! never overwrite each other; the result stitches the start-side chain to
//! the reversed end-side chain at the meeting node.

use gridmaze_core::{Cell, Grid, GridNode};
use rand::Rng;

use crate::pathfinder::{
    NodeRef, OpenList, PathFinder, SearchResult, endpoints, open_list, settle, single,
};
use crate::queue::Queue;
use crate::traits::{AstarPather, Pather};

/// One breadth-first frontier.
struct BfsSide {
    grid: Grid,
    queue: Queue<usize>,
    discovered: Vec<bool>,
}

impl BfsSide {
    fn new(mut grid: Grid, root: usize) -> Self {
        grid.reset_search();
        grid.node_mut(root).g = 0.0;
        let mut discovered = vec![false; grid.len()];
        discovered[root] = true;
        let mut queue = Queue::new();
        queue.enqueue(root);
        Self {
            grid,
            queue,
            discovered,
        }
    }
}

/// One A* frontier, aimed at `target`.
struct AstarSide {
    grid: Grid,
    open: OpenList,
    closed: Vec<bool>,
    target: Cell,
}

impl AstarSide {
    fn new<P: AstarPather>(mut grid: Grid, root: usize, target: Cell, pather: &P) -> Self {
        grid.reset_search();
        let mut open = open_list();
        let n = grid.node_mut(root);
        n.g = 0.0;
        n.h = pather.estimate(n.cell, target);
        n.f = n.h;
        open.insert(NodeRef { idx: root, key: n.f });
        let closed = vec![false; grid.len()];
        Self {
            grid,
            open,
            closed,
            target,
        }
    }

    /// Drop closed and superseded entries from the top of the open list.
    fn prune(&mut self) {
        while let Some(top) = self.open.peek() {
            let stale = self.closed[top.idx] || top.key > self.grid.node(top.idx).f;
            if !stale {
                break;
            }
            self.open.extract_min();
        }
    }

    /// Smallest `f` still open, if any.
    fn min_f(&mut self) -> Option<f64> {
        self.prune();
        self.open.peek().map(|r| r.key)
    }
}

/// Best meeting point found so far.
struct Meeting {
    cost: f64,
    idx: Option<usize>,
}

impl Meeting {
    fn offer(&mut self, idx: usize, cost: f64) {
        if cost < self.cost {
            self.cost = cost;
            self.idx = Some(idx);
        }
    }
}

impl<R: Rng> PathFinder<R> {
    /// Bidirectional breadth-first search.
    ///
    /// The frontiers take turns dequeuing one node each; they meet when a
    /// node dequeued on one side has already been discovered by the other.
    pub fn bidirectional_bfs<P: Pather>(
        &mut self,
        grid: Grid,
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

        let mut fwd = BfsSide::new(grid.clone(), si);
        let mut bwd = BfsSide::new(grid, gi);
        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let mut meet = None;
        while meet.is_none() && !fwd.queue.is_empty() && !bwd.queue.is_empty() {
            meet = bfs_step(&mut fwd, &bwd, pather, &mut nbuf, &mut visited);
            if meet.is_none() {
                meet = bfs_step(&mut bwd, &fwd, pather, &mut nbuf, &mut visited);
            }
        }

        self.nbuf = nbuf;
        stitch("bi-bfs", &fwd.grid, &bwd.grid, meet, visited)
    }

    /// Bidirectional A*.
    ///
    /// Each side runs A* towards the other's root and they alternate single
    /// expansions. Whenever a node has a known cost from both sides, the sum
    /// is a candidate; the cheapest candidate is kept. The search stops once
    /// either side's smallest open `f` reaches the best candidate, at which
    /// point no unexplored route can be cheaper.
    pub fn bidirectional_astar<P: AstarPather>(
        &mut self,
        grid: Grid,
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

        let mut fwd = AstarSide::new(grid.clone(), si, end, pather);
        let mut bwd = AstarSide::new(grid, gi, start, pather);
        let mut best = Meeting {
            cost: f64::INFINITY,
            idx: None,
        };
        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let mut forward_turn = true;
        loop {
            let (Some(ff), Some(fb)) = (fwd.min_f(), bwd.min_f()) else {
                break;
            };
            if ff.max(fb) >= best.cost {
                break;
            }
            if forward_turn {
                astar_step(&mut fwd, &bwd, pather, &mut nbuf, &mut visited, &mut best);
            } else {
                astar_step(&mut bwd, &fwd, pather, &mut nbuf, &mut visited, &mut best);
            }
            forward_turn = !forward_turn;
        }

        self.nbuf = nbuf;
        stitch("bi-astar", &fwd.grid, &bwd.grid, best.idx, visited)
    }
}

/// Dequeue and expand one node of `side`. Returns the meeting node if the
/// dequeued node is already known to `other`.
fn bfs_step<P: Pather>(
    side: &mut BfsSide,
    other: &BfsSide,
    pather: &P,
    nbuf: &mut Vec<Cell>,
    visited: &mut Vec<GridNode>,
) -> Option<usize> {
    let ci = side.queue.dequeue();
    settle(&mut side.grid, ci, visited);
    if other.discovered[ci] {
        return Some(ci);
    }

    let cp = side.grid.cell(ci);
    let next_g = side.grid.node(ci).g + 1.0;
    nbuf.clear();
    pather.neighbors(&side.grid, cp, nbuf);
    for &np in nbuf.iter() {
        let Some(ni) = side.grid.index(np) else {
            continue;
        };
        if side.discovered[ni] {
            continue;
        }
        side.discovered[ni] = true;
        let n = side.grid.node_mut(ni);
        n.parent = Some(ci);
        n.g = next_g;
        side.queue.enqueue(ni);
    }
    None
}

/// Settle and expand one node of `side`, offering meeting candidates.
fn astar_step<P: AstarPather>(
    side: &mut AstarSide,
    other: &AstarSide,
    pather: &P,
    nbuf: &mut Vec<Cell>,
    visited: &mut Vec<GridNode>,
    best: &mut Meeting,
) {
    side.prune();
    if side.open.is_empty() {
        return;
    }
    let ci = side.open.extract_min().idx;
    side.closed[ci] = true;
    settle(&mut side.grid, ci, visited);

    let current_g = side.grid.node(ci).g;
    let other_g = other.grid.node(ci).g;
    if other_g.is_finite() {
        best.offer(ci, current_g + other_g);
    }

    let cp = side.grid.cell(ci);
    nbuf.clear();
    pather.neighbors(&side.grid, cp, nbuf);
    for &np in nbuf.iter() {
        let Some(ni) = side.grid.index(np) else {
            continue;
        };
        if side.closed[ni] {
            continue;
        }
        let tentative = current_g + pather.cost(cp, np);
        let n = side.grid.node_mut(ni);
        if tentative >= n.g {
            continue;
        }
        if n.parent.is_none() {
            n.h = pather.estimate(np, side.target);
        }
        n.g = tentative;
        n.f = tentative + n.h;
        n.parent = Some(ci);
        side.open.insert(NodeRef { idx: ni, key: n.f });

        let other_g = other.grid.node(ni).g;
        if other_g.is_finite() {
            best.offer(ni, tentative + other_g);
        }
    }
}

/// Build the result from the two half-chains meeting at `meet`.
///
/// `path_from_start` runs start → meet and `path_from_end` runs end → meet;
/// the shorter one is padded with copies of its last node so that replaying
/// both side by side finishes together.
fn stitch(
    name: &str,
    fwd: &Grid,
    bwd: &Grid,
    meet: Option<usize>,
    visited: Vec<GridNode>,
) -> SearchResult {
    let Some(m) = meet else {
        log::debug!("{name}: found=false visited={}", visited.len());
        return SearchResult {
            visited,
            ..SearchResult::default()
        };
    };

    let half = |grid: &Grid| -> Vec<GridNode> {
        grid.trace_back(m)
            .into_iter()
            .map(|i| {
                let mut n = grid.node(i).clone();
                n.mark_solution();
                n
            })
            .collect()
    };
    let mut from_start = half(fwd);
    let mut from_end = half(bwd);

    let mut path = from_start.clone();
    path.extend(from_end.iter().rev().skip(1).cloned());

    let len = from_start.len().max(from_end.len());
    pad(&mut from_start, len);
    pad(&mut from_end, len);

    log::debug!(
        "{name}: found=true visited={} path={} meet={}",
        visited.len(),
        path.len(),
        fwd.cell(m)
    );
    SearchResult {
        visited,
        path,
        found: true,
        path_from_start: from_start,
        path_from_end: from_end,
    }
}

fn pad(half: &mut Vec<GridNode>, len: usize) {
    if let Some(last) = half.last().cloned() {
        half.resize(len, last);
    }
}
