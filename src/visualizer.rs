use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::algorithms::{Algorithm, SearchOutcome};
use crate::animation::{AnimationSequencer, PathAnimation, Ticker, DEFAULT_STEP_DELAY};
use crate::error::{PathError, Result};
use crate::grid::{Grid, Position};
use crate::path::Path;
use crate::render::PathRenderer;

pub enum RunOutcome {
    PathFound(PathAnimation),
    NoPathFound,
}

/// What one search run produced.
pub struct RunReport {
    pub algorithm: Algorithm,
    pub start: Position,
    pub end: Position,
    pub outcome: RunOutcome,
    pub visited: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn found(&self) -> bool {
        matches!(self.outcome, RunOutcome::PathFound(_))
    }

    /// The found path, or `NoPathFound`.
    pub fn path(&self) -> Result<&[Position]> {
        match &self.outcome {
            RunOutcome::PathFound(animation) => Ok(animation.path()),
            RunOutcome::NoPathFound => Err(PathError::NoPathFound {
                algorithm: self.algorithm.to_string(),
                start: self.start,
                end: self.end,
            }),
        }
    }

    pub fn path_len(&self) -> Option<usize> {
        self.path().ok().map(<[Position]>::len)
    }
}

/// Owns the grid between paints and runs, and sequences the path highlight.
///
/// Painting, running and the reset controls all cancel a pending animation
/// first, so two runs never write highlights at the same time.
pub struct Visualizer {
    grid: Grid,
    sequencer: AnimationSequencer,
    highlighted: Vec<Position>,
    step_delay: Duration,
}

impl Visualizer {
    pub fn new(grid: Grid) -> Self {
        Self::with_step_delay(grid, DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(grid: Grid, step_delay: Duration) -> Self {
        Visualizer {
            grid,
            sequencer: AnimationSequencer::new(),
            highlighted: Vec::new(),
            step_delay,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Cells highlighted so far by [`Visualizer::play`].
    pub fn highlighted(&self) -> &[Position] {
        &self.highlighted
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn set_start(&mut self, pos: Position) -> Result<()> {
        self.clear_shortest_path();
        self.grid.set_start(pos)
    }

    pub fn set_end(&mut self, pos: Position) -> Result<()> {
        self.clear_shortest_path();
        self.grid.set_end(pos)
    }

    pub fn set_wall(&mut self, pos: Position) -> Result<()> {
        self.clear_shortest_path();
        self.grid.set_wall(pos)
    }

    pub fn remove_wall(&mut self, pos: Position) -> Result<()> {
        self.clear_shortest_path();
        self.grid.remove_wall(pos)
    }

    pub fn erase(&mut self, pos: Position) -> Result<()> {
        self.clear_shortest_path();
        self.grid.erase(pos)
    }

    /// Paint a wall, ignoring cells that hold the start or end.
    /// Returns whether the wall was placed.
    pub fn paint_wall(&mut self, pos: Position) -> Result<bool> {
        match self.set_wall(pos) {
            Ok(()) => Ok(true),
            Err(PathError::InvalidPaint { pos, conflict }) => {
                warn!("Ignoring wall at {}: {}", pos, conflict);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the highlight only; node state is untouched.
    pub fn clear_shortest_path(&mut self) {
        self.sequencer.cancel();
        self.highlighted.clear();
    }

    /// Forget the last run's annotations, keeping walls and endpoints.
    pub fn reset_run_state(&mut self) {
        self.clear_shortest_path();
        self.grid.reset();
    }

    /// Wipe walls, endpoints and annotations.
    pub fn clear_all(&mut self) {
        self.clear_shortest_path();
        self.grid.clear();
    }

    /// Search with `algorithm` and prepare the path animation.
    ///
    /// Fails with `MissingEndpoint` before searching when the start or end is
    /// not placed. A failed search is reported as [`RunOutcome::NoPathFound`].
    pub fn run(&mut self, algorithm: Algorithm) -> Result<RunReport> {
        let (start, end) = self.grid.endpoints()?;
        self.reset_run_state();

        let mut engine = algorithm.build();
        let timer = Instant::now();
        let outcome = engine.search(&mut self.grid, start, end);
        let elapsed = timer.elapsed();

        let path = Path::reconstruct(&self.grid, end);
        let visited = self.grid.visited_count();

        let outcome = if outcome == SearchOutcome::Reached && path.connects(start, end) {
            info!(
                "{} found a {}-step path from {} to {} ({} nodes visited, {:.2?})",
                algorithm,
                path.steps(),
                start,
                end,
                visited,
                elapsed
            );
            RunOutcome::PathFound(self.sequencer.begin(path.into_cells()))
        } else {
            info!(
                "{} found no path from {} to {} ({} nodes visited)",
                algorithm, start, end, visited
            );
            RunOutcome::NoPathFound
        };

        Ok(RunReport {
            algorithm,
            start,
            end,
            outcome,
            visited,
            elapsed,
        })
    }

    /// Feed `animation` to `renderer` one cell per tick. Stops early if the
    /// animation has been superseded. Returns how many cells were marked.
    pub fn play<R, T>(&mut self, animation: &mut PathAnimation, renderer: &mut R, ticker: &mut T) -> usize
    where
        R: PathRenderer,
        T: Ticker,
    {
        let mut marked = 0;
        for pos in animation.by_ref() {
            renderer.mark_path(&self.grid, pos);
            self.highlighted.push(pos);
            marked += 1;
            ticker.wait(self.step_delay);
        }
        marked
    }
}
