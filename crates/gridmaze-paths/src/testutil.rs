//! Fixtures shared by the search tests.

use gridmaze_core::{Adjacency, Cell, Grid};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{PathFinder, SearchResult};

pub(crate) fn finder(seed: u64) -> PathFinder<StdRng> {
    PathFinder::new(StdRng::seed_from_u64(seed))
}

/// A grid whose end cell is boxed in by walls.
pub(crate) fn walled_in_end() -> (Grid, Cell, Cell) {
    let grid = Grid::parse(
        "S......
         .......
         ...###.
         ...#E#.
         ...###.",
    )
    .unwrap();
    (grid, Cell::new(0, 0), Cell::new(3, 4))
}

/// A 5x5 grid with a wall column at col 2, open only at row 2.
pub(crate) fn gap_wall() -> Grid {
    Grid::parse(
        "S.#.E
         ..#..
         .....
         ..#..
         ..#..",
    )
    .unwrap()
}

/// A twisty grid with obstacles, used for cost comparisons.
pub(crate) fn obstacle_course() -> (Grid, Cell, Cell) {
    let grid = Grid::parse(
        "S.........
         ########..
         ..........
         .#########
         ..........
         .####.###.
         .#......#.
         .#.####.#.
         ...#...E#.
         ..........",
    )
    .unwrap();
    (grid, Cell::new(0, 0), Cell::new(8, 7))
}

pub(crate) fn assert_contiguous(r: &SearchResult, adjacency: Adjacency) {
    for w in r.path.windows(2) {
        assert!(
            adjacency.is_step(w[0].cell, w[1].cell),
            "{} -> {} is not a single step",
            w[0].cell,
            w[1].cell
        );
    }
}

pub(crate) fn assert_unique_visited(r: &SearchResult) {
    let mut cells = r.visited_cells();
    let n = cells.len();
    cells.sort();
    cells.dedup();
    assert_eq!(cells.len(), n, "visited contains duplicates");
}

pub(crate) fn assert_walkable(r: &SearchResult, grid: &Grid) {
    for n in &r.path {
        assert!(!grid.is_wall(n.cell), "path crosses wall at {}", n.cell);
    }
}
