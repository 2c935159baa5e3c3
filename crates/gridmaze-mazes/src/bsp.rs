//! Binary space partition rooms and corridors.
//!
//! The area is split recursively until partitions get too small to split;
//! every leaf gets one randomly sized room, and consecutive rooms (in
//! partition order) are joined by L-shaped corridors through their centres.

use gridmaze_core::{Cell, Rect};
use rand::{Rng, RngExt};

use crate::{MazeParams, MazeStep, l_path};

/// A partition at least this much longer on one axis is always cut across
/// that axis; otherwise the cut direction is random.
const ASPECT: f64 = 1.25;

/// Tuning for [`Bsp`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BspConfig {
    /// Smallest side a partition may have after a split.
    pub min_partition: i32,
    /// Smallest room side, when the partition leaves room for it.
    pub min_room: i32,
    /// Cells kept solid between a room and its partition edge.
    pub padding: i32,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            min_partition: 6,
            min_room: 3,
            padding: 1,
        }
    }
}

impl BspConfig {
    pub fn with_min_partition(mut self, min_partition: i32) -> Self {
        self.min_partition = min_partition.max(1);
        self
    }

    pub fn with_min_room(mut self, min_room: i32) -> Self {
        self.min_room = min_room.max(1);
        self
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding.max(0);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Plan,
    Rooms(usize),
    Corridors(usize),
    Done,
}

/// BSP generator. Yields one batch per room, then one per corridor.
pub struct Bsp<R: Rng> {
    rng: R,
    params: MazeParams,
    config: BspConfig,
    rooms: Vec<Rect>,
    carved: Vec<bool>,
    phase: Phase,
}

impl<R: Rng> Bsp<R> {
    pub fn new(params: MazeParams, config: BspConfig, rng: R) -> Self {
        Self {
            rng,
            params,
            config,
            rooms: Vec::new(),
            carved: vec![false; params.len()],
            phase: Phase::Plan,
        }
    }

    /// Rooms planned so far, in local coordinates.
    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    fn split(&mut self, part: Rect, leaves: &mut Vec<Rect>) {
        let min = self.config.min_partition;
        let across_cols = match (part.width() >= 2 * min, part.height() >= 2 * min) {
            (false, false) => {
                leaves.push(part);
                return;
            }
            (true, false) => true,
            (false, true) => false,
            (true, true) => {
                let (w, h) = (part.width() as f64, part.height() as f64);
                if w / h >= ASPECT {
                    true
                } else if h / w >= ASPECT {
                    false
                } else {
                    self.rng.random_bool(0.5)
                }
            }
        };

        let (a, b) = if across_cols {
            let at = part.min.col + self.rng.random_range(min..=part.width() - min);
            (
                Rect::new(part.min.row, part.min.col, part.max.row, at),
                Rect::new(part.min.row, at, part.max.row, part.max.col),
            )
        } else {
            let at = part.min.row + self.rng.random_range(min..=part.height() - min);
            (
                Rect::new(part.min.row, part.min.col, at, part.max.col),
                Rect::new(at, part.min.col, part.max.row, part.max.col),
            )
        };
        self.split(a, leaves);
        self.split(b, leaves);
    }

    fn room(&mut self, leaf: Rect) -> Option<Rect> {
        let pad = self.config.padding;
        let (iw, ih) = (leaf.width() - 2 * pad, leaf.height() - 2 * pad);
        if iw < 1 || ih < 1 {
            return None;
        }
        let w = self.rng.random_range(self.config.min_room.clamp(1, iw)..=iw);
        let h = self.rng.random_range(self.config.min_room.clamp(1, ih)..=ih);
        let origin = Cell::new(
            leaf.min.row + pad + self.rng.random_range(0..=ih - h),
            leaf.min.col + pad + self.rng.random_range(0..=iw - w),
        );
        Some(Rect::with_size(origin, w, h))
    }

    fn plan(&mut self) {
        let mut leaves = Vec::new();
        self.split(self.params.area(), &mut leaves);
        let rooms: Vec<Rect> = leaves.into_iter().filter_map(|l| self.room(l)).collect();
        self.rooms = rooms;
        log::debug!("bsp: {} rooms", self.rooms.len());
    }

    /// Yield-ready batch of the cells in `cells` not carved yet.
    fn fresh(&mut self, cells: impl IntoIterator<Item = Cell>) -> MazeStep {
        let mut step = MazeStep::default();
        for c in cells {
            let i = self.params.index(c);
            if !self.carved[i] {
                self.carved[i] = true;
                step.cells_to_carve.push(self.params.place(c));
            }
        }
        step
    }
}

impl<R: Rng> Iterator for Bsp<R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        loop {
            let step = match self.phase {
                Phase::Plan => {
                    self.plan();
                    self.phase = Phase::Rooms(0);
                    continue;
                }
                Phase::Rooms(i) if i < self.rooms.len() => {
                    self.phase = Phase::Rooms(i + 1);
                    let room = self.rooms[i];
                    self.fresh(room)
                }
                Phase::Rooms(_) => {
                    self.phase = Phase::Corridors(1);
                    continue;
                }
                Phase::Corridors(i) if i < self.rooms.len() => {
                    self.phase = Phase::Corridors(i + 1);
                    let from = self.rooms[i - 1].center();
                    let to = self.rooms[i].center();
                    let horizontal_first = self.rng.random_bool(0.5);
                    self.fresh(l_path(from, to, horizontal_first))
                }
                Phase::Corridors(_) => {
                    self.phase = Phase::Done;
                    continue;
                }
                Phase::Done => return None,
            };
            if !step.is_empty() {
                return Some(step);
            }
        }
    }
}
