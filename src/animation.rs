//! Step-by-step playback of a found path.
//!
//! A [`PathAnimation`] yields one cell per call to `next()`; whoever drives it
//! waits on a [`Ticker`] between cells. Each animation carries an
//! [`AnimationToken`] issued by an [`AnimationSequencer`], and issuing a new
//! animation (or cancelling) makes every older token report cancelled, so a
//! stale animation simply stops yielding.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crate::grid::Position;

/// Default pause between two highlighted cells.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Waits out the pause between two animation steps.
pub trait Ticker {
    fn wait(&mut self, interval: Duration);
}

/// Blocks the current thread for the interval.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&mut self, interval: Duration) {
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
}

/// Returns immediately; used when visualization is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantTicker;

impl Ticker for InstantTicker {
    fn wait(&mut self, _interval: Duration) {}
}

#[derive(Debug, Clone)]
pub struct AnimationToken {
    current: Rc<Cell<u64>>,
    issued: u64,
}

impl AnimationToken {
    pub fn is_cancelled(&self) -> bool {
        self.current.get() != self.issued
    }
}

/// Hands out animations; only the most recent one stays live.
#[derive(Debug, Default)]
pub struct AnimationSequencer {
    generation: Rc<Cell<u64>>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate any pending animation and start a new one over `cells`.
    pub fn begin(&mut self, cells: Vec<Position>) -> PathAnimation {
        self.cancel();
        PathAnimation {
            cells,
            cursor: 0,
            token: AnimationToken {
                current: Rc::clone(&self.generation),
                issued: self.generation.get(),
            },
        }
    }

    pub fn cancel(&mut self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

#[derive(Debug)]
pub struct PathAnimation {
    cells: Vec<Position>,
    cursor: usize,
    token: AnimationToken,
}

impl PathAnimation {
    /// The full path, including cells already yielded.
    pub fn path(&self) -> &[Position] {
        &self.cells
    }

    pub fn remaining(&self) -> usize {
        if self.token.is_cancelled() {
            0
        } else {
            self.cells.len() - self.cursor
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &AnimationToken {
        &self.token
    }
}

impl Iterator for PathAnimation {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.token.is_cancelled() {
            return None;
        }
        let cell = self.cells.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(cell)
    }
}
