//! Distance strategies between cells.

use crate::geom::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> f64 {
    ((a.row - b.row).abs() + (a.col - b.col).abs()) as f64
}

/// Euclidean (L2) distance between two cells.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let dr = (a.row - b.row) as f64;
    let dc = (a.col - b.col) as f64;
    dr.hypot(dc)
}

/// Interchangeable distance metric.
///
/// Pair [`Manhattan`](Self::Manhattan) with 4-direction adjacency and
/// [`Euclidean`](Self::Euclidean) with 8-direction adjacency; either way the
/// estimate never exceeds the true step cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    #[default]
    Manhattan,
    Euclidean,
}

impl Distance {
    /// Distance between `a` and `b` under this metric.
    #[inline]
    pub fn calculate(self, a: Cell, b: Cell) -> f64 {
        match self {
            Self::Manhattan => manhattan(a, b),
            Self::Euclidean => euclidean(a, b),
        }
    }
}
