//! **gridmaze-core**: grid data model shared by the gridmaze crates.
//!
//! This crate provides the cell geometry, the [`GridNode`] arena that search
//! algorithms write their bookkeeping into, the distance and adjacency
//! strategies, and the cancellation/throttling protocol used to animate
//! step-by-step output.

pub mod distance;
pub mod geom;
pub mod grid;
pub mod neighbors;
pub mod node;
pub mod run;

pub use distance::{Distance, euclidean, manhattan};
pub use geom::{Cell, Rect};
pub use grid::{Grid, GridParseError};
pub use neighbors::{Adjacency, Neighbors};
pub use node::{GridNode, NodeState};
pub use run::{CancelToken, DriveOutcome, Throttle, drive};
