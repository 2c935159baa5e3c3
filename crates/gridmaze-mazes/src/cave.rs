//! Cellular-automata caves.
//!
//! Cells start open with probability [`CaveConfig::open_probability`], then
//! the automaton runs for a few generations: a cell is wall when at least
//! [`CaveConfig::wall_threshold`] of its 8 neighbours are walls (the outside
//! counts as wall), open otherwise.
//!
//! The whole evolution is computed on the first pull. Each generation then
//! yields the cells it opened that are still open at the end, so the output
//! stays additive and adds up to exactly the final cave. An optional repair
//! pass joins every region cut off from the main one with an L-shaped
//! tunnel.

use gridmaze_core::Cell;
use gridmaze_paths::Queue;
use rand::{Rng, RngExt};

use crate::{MazeParams, MazeStep, l_path};

/// Tuning for [`Cave`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveConfig {
    /// Chance that a cell starts open.
    pub open_probability: f64,
    /// Number of automaton generations after seeding.
    pub iterations: usize,
    /// Wall neighbours (out of 8) that turn a cell into wall.
    pub wall_threshold: u32,
    /// Tunnel disconnected regions into the main one.
    pub repair_connectivity: bool,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            open_probability: 0.45,
            iterations: 5,
            wall_threshold: 5,
            repair_connectivity: true,
        }
    }
}

impl CaveConfig {
    pub fn with_open_probability(mut self, p: f64) -> Self {
        self.open_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_wall_threshold(mut self, threshold: u32) -> Self {
        self.wall_threshold = threshold;
        self
    }

    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair_connectivity = repair;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Seed,
    Grow(usize),
    Repair,
    Done,
}

/// Cave generator.
pub struct Cave<R: Rng> {
    rng: R,
    params: MazeParams,
    config: CaveConfig,
    // open flags per generation; emptied once grown
    generations: Vec<Vec<bool>>,
    // cells yielded so far, i.e. the current cave
    open: Vec<bool>,
    phase: Phase,
}

impl<R: Rng> Cave<R> {
    pub fn new(params: MazeParams, config: CaveConfig, rng: R) -> Self {
        Self {
            rng,
            params,
            config,
            generations: Vec::new(),
            open: vec![false; params.len()],
            phase: Phase::Seed,
        }
    }

    fn is_open(cells: &[bool], params: &MazeParams, c: Cell) -> bool {
        params.area().contains(c) && cells[params.index(c)]
    }

    fn evolve(&self, prev: &[bool]) -> Vec<bool> {
        let threshold = self.config.wall_threshold;
        self.params
            .area()
            .iter()
            .map(|c| {
                let mut walls = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if (dr, dc) != (0, 0) && !Self::is_open(prev, &self.params, c.shift(dr, dc)) {
                            walls += 1;
                        }
                    }
                }
                walls < threshold
            })
            .collect()
    }

    fn seed(&mut self) {
        let p = self.config.open_probability.clamp(0.0, 1.0);
        let first: Vec<bool> = (0..self.params.len())
            .map(|_| self.rng.random_bool(p))
            .collect();
        self.generations.push(first);
        for _ in 0..self.config.iterations {
            let next = self.evolve(&self.generations[self.generations.len() - 1]);
            self.generations.push(next);
        }
    }

    /// Cells opened by generation `k` that survive to the end.
    fn grow(&mut self, k: usize) -> MazeStep {
        let mut step = MazeStep::default();
        let (Some(gen_k), Some(last)) = (self.generations.get(k), self.generations.last()) else {
            return step;
        };
        for (i, c) in self.params.area().iter().enumerate() {
            if gen_k[i] && last[i] && !self.open[i] {
                self.open[i] = true;
                step.cells_to_carve.push(self.params.place(c));
            }
        }
        step
    }

    /// Cells reachable from `from` through open cells.
    fn region(&self, from: Cell) -> Vec<bool> {
        let mut seen = vec![false; self.open.len()];
        let mut queue = Queue::new();
        seen[self.params.index(from)] = true;
        queue.enqueue(from);
        while !queue.is_empty() {
            let c = queue.dequeue();
            for n in c.neighbors_4() {
                if Self::is_open(&self.open, &self.params, n) && !seen[self.params.index(n)] {
                    seen[self.params.index(n)] = true;
                    queue.enqueue(n);
                }
            }
        }
        seen
    }

    /// Tunnel from the first cut-off cell to the closest cell of the main
    /// region, or `None` once everything is connected.
    fn repair(&mut self) -> Option<MazeStep> {
        let area = self.params.area();
        let center = area.center();
        let root = area
            .iter()
            .filter(|&c| self.open[self.params.index(c)])
            .min_by_key(|&c| {
                let d = c - center;
                d.row * d.row + d.col * d.col
            })?;
        let main = self.region(root);

        let cut_off = area.iter().find(|&c| {
            let i = self.params.index(c);
            self.open[i] && !main[i]
        })?;
        let target = area
            .iter()
            .filter(|&c| main[self.params.index(c)])
            .min_by_key(|&c| {
                let d = c - cut_off;
                d.row.abs() + d.col.abs()
            })?;

        let horizontal_first = self.rng.random_bool(0.5);
        let mut step = MazeStep::default();
        for c in l_path(cut_off, target, horizontal_first) {
            let i = self.params.index(c);
            if !self.open[i] {
                self.open[i] = true;
                step.cells_to_carve.push(self.params.place(c));
            }
        }
        log::trace!("cave: tunnel {cut_off} -> {target} ({} cells)", step.len());
        Some(step)
    }
}

impl<R: Rng> Iterator for Cave<R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        loop {
            match self.phase {
                Phase::Seed => {
                    self.seed();
                    self.phase = Phase::Grow(0);
                }
                Phase::Grow(k) if k < self.generations.len() => {
                    self.phase = Phase::Grow(k + 1);
                    let step = self.grow(k);
                    if !step.is_empty() {
                        return Some(step);
                    }
                }
                Phase::Grow(_) => {
                    self.generations = Vec::new();
                    self.phase = if self.config.repair_connectivity {
                        Phase::Repair
                    } else {
                        Phase::Done
                    };
                }
                Phase::Repair => match self.repair() {
                    Some(step) => return Some(step),
                    None => self.phase = Phase::Done,
                },
                Phase::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_connected, reachable, render};
    use gridmaze_core::NodeState;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fully_open_seed_loses_only_corners() {
        let params = MazeParams::new(10, 8);
        let config = CaveConfig::default().with_open_probability(1.0);
        let mut cave = Cave::new(params, config, StdRng::seed_from_u64(0));
        let first = cave.next().unwrap();
        assert_eq!(first.len(), 80 - 4);
        assert!(!first.cells_to_carve.contains(&Cell::new(0, 0)));
        assert!(!first.cells_to_carve.contains(&Cell::new(7, 9)));
        assert_eq!(cave.next(), None);
    }

    #[test]
    fn closed_seed_yields_nothing() {
        let params = MazeParams::new(12, 12);
        let config = CaveConfig::default().with_open_probability(0.0);
        let mut cave = Cave::new(params, config, StdRng::seed_from_u64(0));
        assert_eq!(cave.next(), None);
    }

    #[test]
    fn without_repair_only_growth_batches() {
        let params = MazeParams::new(40, 30);
        let config = CaveConfig::default().with_repair(false);
        let steps: Vec<MazeStep> = Cave::new(params, config, StdRng::seed_from_u64(11)).collect();
        assert!(!steps.is_empty());
        assert!(steps.len() <= config.iterations + 1);
    }

    #[test]
    fn repair_connects_regions() {
        let params = MazeParams::new(48, 32);
        for seed in 0..8 {
            let grid = render(params, Cave::new(params, CaveConfig::default(), StdRng::seed_from_u64(seed)));
            assert_connected(&grid);
        }
    }

    proptest! {
        #[test]
        fn repaired_caves_are_connected(seed in any::<u64>(), w in 1i32..40, h in 1i32..30) {
            let params = MazeParams::new(w, h);
            let grid = render(params, Cave::new(params, CaveConfig::default(), StdRng::seed_from_u64(seed)));
            prop_assert_eq!(reachable(&grid), grid.count(NodeState::Empty));
        }
    }
}
