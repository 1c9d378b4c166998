pub mod a_star;
pub mod common;
pub mod dijkstra;

pub use common::{Algorithm, PathfindingAlgorithm, SearchOutcome};
