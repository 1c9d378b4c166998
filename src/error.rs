//! Error types for the pathfinding visualizer

use std::fmt;

use thiserror::Error;

use crate::grid::Position;

/// Which endpoint a run was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Why a paint request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintConflict {
    WallOverStart,
    WallOverEnd,
    StartOverEnd,
    EndOverStart,
}

impl fmt::Display for PaintConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintConflict::WallOverStart => write!(f, "cannot place a wall on the start cell"),
            PaintConflict::WallOverEnd => write!(f, "cannot place a wall on the end cell"),
            PaintConflict::StartOverEnd => write!(f, "cannot place the start on the end cell"),
            PaintConflict::EndOverStart => write!(f, "cannot place the end on the start cell"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("no {0} cell placed; both start and end are required before running a search")]
    MissingEndpoint(Endpoint),

    #[error("{algorithm} found no path from {start} to {end}")]
    NoPathFound {
        algorithm: String,
        start: Position,
        end: Position,
    },

    #[error("invalid paint at {pos}: {conflict}")]
    InvalidPaint {
        pos: Position,
        conflict: PaintConflict,
    },

    #[error("{pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("unknown algorithm '{0}' (expected 'dijkstra' or 'a-star')")]
    UnknownAlgorithm(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PathError>;
