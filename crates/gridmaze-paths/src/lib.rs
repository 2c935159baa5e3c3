//! Pathfinding on [`gridmaze_core::Grid`]s, with replayable output.
//!
//! This crate provides nine interchangeable search strategies behind one
//! contract, [`PathFinder::solve`]:
//!
//! - **DFS** and **greedy DFS** ([`PathFinder::dfs`], [`PathFinder::greedy_dfs`])
//! - **BFS** ([`PathFinder::bfs`])
//! - **Greedy best-first** ([`PathFinder::greedy_best_first`])
//! - **Dijkstra** ([`PathFinder::dijkstra`])
//! - **A\*** ([`PathFinder::astar`])
//! - **Bidirectional BFS** and **bidirectional A\***
//!   ([`PathFinder::bidirectional_bfs`], [`PathFinder::bidirectional_astar`])
//! - **Jump Point Search** ([`PathFinder::jps`])
//!
//! Every strategy takes a grid snapshot by value and returns a
//! [`SearchResult`] holding the settle order and the solution path.
//! [`ReplayPlan`] turns that into frames a renderer can paint one by one.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, bidirectional BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | DFS, greedy DFS, greedy best-first, A*, bidirectional A* |
//!
//! JPS scans the grid directly and takes a concrete [`GridPather`].

mod astar;
mod bfs;
mod bidirectional;
mod dfs;
mod dijkstra;
mod greedy;
mod heap;
mod jps;
mod pathfinder;
mod queue;
pub mod replay;
mod traits;

#[cfg(test)]
mod testutil;

pub use heap::MinHeap;
pub use pathfinder::{Algorithm, PathFinder, SearchResult, UnknownAlgorithm};
pub use queue::{Queue, Stack};
pub use replay::{ReplayFrame, ReplayPlan, apply_frame};
pub use traits::{AstarPather, GridPather, Pather, WeightedPather};
