use gridmaze_core::{Adjacency, Cell, Distance, Grid};

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the traversable neighbors of `c` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, grid: &Grid, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}

/// The stock pather: grid adjacency with a distance metric used both as
/// edge cost and as heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPather {
    pub adjacency: Adjacency,
    pub distance: Distance,
}

impl GridPather {
    /// Pather for `adjacency` with its admissible distance
    /// (Manhattan for 4-way, Euclidean for 8-way).
    pub fn new(adjacency: Adjacency) -> Self {
        Self {
            adjacency,
            distance: adjacency.distance(),
        }
    }

    /// 4-way movement, Manhattan distance.
    pub fn four() -> Self {
        Self::new(Adjacency::Four)
    }

    /// 8-way movement, Euclidean distance.
    pub fn eight() -> Self {
        Self::new(Adjacency::Eight)
    }
}

impl Default for GridPather {
    fn default() -> Self {
        Self::four()
    }
}

impl Pather for GridPather {
    fn neighbors(&self, grid: &Grid, c: Cell, buf: &mut Vec<Cell>) {
        self.adjacency.push_neighbors(grid, c, buf);
    }
}

impl WeightedPather for GridPather {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        self.distance.calculate(from, to)
    }
}

impl AstarPather for GridPather {
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self.distance.calculate(from, to)
    }
}
