//! Grid pathfinding visualizer.
//!
//! Paint a start, an end and walls on a [`grid::Grid`], run Dijkstra or A*
//! through a [`visualizer::Visualizer`], and play the shortest path back one
//! cell at a time through a [`render::PathRenderer`].

pub mod algorithms;
pub mod animation;
pub mod config;
pub mod error;
pub mod grid;
pub mod path;
pub mod render;
pub mod statistics;
pub mod visualizer;

pub use algorithms::Algorithm;
pub use error::{PathError, Result};
pub use grid::{Grid, Node, Position};
pub use visualizer::{RunOutcome, RunReport, Visualizer};
