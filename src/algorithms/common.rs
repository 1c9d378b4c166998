use std::fmt;
use std::str::FromStr;

use crate::algorithms::a_star::AStar;
use crate::algorithms::dijkstra::Dijkstra;
use crate::error::PathError;
use crate::grid::{Grid, Position};

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end node was popped; its `previous` chain leads back to the start.
    Reached,
    /// The frontier ran dry or only unreachable nodes were left.
    Exhausted,
}

pub trait PathfindingAlgorithm {
    fn name(&self) -> &'static str;

    /// Annotate `grid` in place with distances, heuristics, predecessors and
    /// visited flags. The caller resets the grid beforehand.
    fn search(&mut self, grid: &mut Grid, start: Position, end: Position) -> SearchOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::AStar];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a-star",
        }
    }

    pub fn build(&self) -> Box<dyn PathfindingAlgorithm> {
        match self {
            Algorithm::Dijkstra => Box::new(Dijkstra::new()),
            Algorithm::AStar => Box::new(AStar::new()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "a-star" => Ok(Algorithm::AStar),
            other => Err(PathError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
