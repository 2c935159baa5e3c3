//! Adjacency enumeration over a [`Grid`].

use crate::distance::Distance;
use crate::geom::Cell;
use crate::grid::Grid;

/// Which moves count as adjacent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// Cardinal moves only.
    #[default]
    Four,
    /// Cardinal plus diagonal moves.
    Eight,
}

impl Adjacency {
    /// The distance metric that stays admissible for this move set.
    #[inline]
    pub fn distance(self) -> Distance {
        match self {
            Self::Four => Distance::Manhattan,
            Self::Eight => Distance::Euclidean,
        }
    }

    /// Whether `b` is one legal move away from `a`, ignoring terrain.
    #[inline]
    pub fn is_step(self, a: Cell, b: Cell) -> bool {
        let d = b - a;
        match self {
            Self::Four => d.row.abs() + d.col.abs() == 1,
            Self::Eight => a.touches(b),
        }
    }
}

/// Cached neighbor computation helper.
///
/// Enumerates the traversable neighbors of a cell in a fixed order: left,
/// right, top, bottom, then (for [`Adjacency::Eight`]) top-left, top-right,
/// bottom-left, bottom-right. A diagonal is only offered when both cardinal
/// cells it squeezes between are traversable.
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Traversable neighbors of `c` in `grid` under `mode`.
    pub fn adjacent(&mut self, grid: &Grid, c: Cell, mode: Adjacency) -> &[Cell] {
        self.buf.clear();
        mode.push_neighbors(grid, c, &mut self.buf);
        &self.buf
    }
}

impl Adjacency {
    /// Append the traversable neighbors of `c` to `buf`, in the fixed
    /// order documented on [`Neighbors`].
    pub fn push_neighbors(self, grid: &Grid, c: Cell, buf: &mut Vec<Cell>) {
        let [left, right, top, bottom] = c.neighbors_4();
        let open = [left, right, top, bottom].map(|n| grid.is_traversable(n));
        for (n, ok) in [left, right, top, bottom].into_iter().zip(open) {
            if ok {
                buf.push(n);
            }
        }
        if self == Adjacency::Eight {
            let [l, r, t, b] = open;
            let diagonals = [
                (t && l, c.shift(-1, -1)),
                (t && r, c.shift(-1, 1)),
                (b && l, c.shift(1, -1)),
                (b && r, c.shift(1, 1)),
            ];
            for (gate, n) in diagonals {
                if gate && grid.is_traversable(n) {
                    buf.push(n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order() {
        let g = Grid::new(3, 3);
        let mut nb = Neighbors::new();
        let got = nb.adjacent(&g, Cell::new(1, 1), Adjacency::Four).to_vec();
        assert_eq!(
            got,
            vec![
                Cell::new(1, 0),
                Cell::new(1, 2),
                Cell::new(0, 1),
                Cell::new(2, 1)
            ]
        );
    }

    #[test]
    fn corner_is_clipped() {
        let g = Grid::new(3, 3);
        let mut nb = Neighbors::new();
        let got = nb.adjacent(&g, Cell::new(0, 0), Adjacency::Eight).to_vec();
        assert_eq!(got, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn diagonals_need_both_cardinals() {
        let g = Grid::parse(
            "...
             .#.
             ...",
        )
        .unwrap();
        let mut nb = Neighbors::new();
        // From the top-left corner the only diagonal is blocked by the wall.
        let got = nb.adjacent(&g, Cell::new(0, 0), Adjacency::Eight).to_vec();
        assert_eq!(got, vec![Cell::new(0, 1), Cell::new(1, 0)]);

        let g = Grid::parse(
            ".#.
             ...",
        )
        .unwrap();
        let got = nb.adjacent(&g, Cell::new(1, 1), Adjacency::Eight).to_vec();
        // top is a wall, so neither upper diagonal is offered.
        assert_eq!(got, vec![Cell::new(1, 0), Cell::new(1, 2)]);
    }

    #[test]
    fn start_and_walls_are_not_neighbors() {
        let g = Grid::parse("S.#\nvE*").unwrap();
        let mut nb = Neighbors::new();
        let got = nb.adjacent(&g, Cell::new(0, 1), Adjacency::Four).to_vec();
        assert_eq!(got, vec![Cell::new(1, 1)]);
        let got = nb.adjacent(&g, Cell::new(1, 1), Adjacency::Four).to_vec();
        assert_eq!(got, vec![Cell::new(1, 0), Cell::new(1, 2), Cell::new(0, 1)]);
    }

    #[test]
    fn step_predicate() {
        let a = Cell::new(2, 2);
        assert!(Adjacency::Four.is_step(a, Cell::new(2, 3)));
        assert!(!Adjacency::Four.is_step(a, Cell::new(3, 3)));
        assert!(Adjacency::Eight.is_step(a, Cell::new(3, 3)));
        assert!(!Adjacency::Eight.is_step(a, Cell::new(4, 3)));
    }
}
