use std::io::{self, Write};

use rustc_hash::FxHashSet;

use crate::grid::{Grid, Position};

/// Receives path highlight signals while an animation plays.
pub trait PathRenderer {
    /// Highlight `pos` as part of the shortest path.
    fn mark_path(&mut self, grid: &Grid, pos: Position);

    /// Drop every highlight and show the bare grid.
    fn clear_path(&mut self, grid: &Grid);
}

/// Redraws the whole grid on stdout for every signal.
pub struct TerminalRenderer {
    highlighted: FxHashSet<Position>,
    clear_screen: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer {
            highlighted: FxHashSet::default(),
            clear_screen: true,
        }
    }

    /// Append frames instead of repainting in place.
    pub fn scrolling() -> Self {
        TerminalRenderer {
            clear_screen: false,
            ..Self::new()
        }
    }

    /// Highlight a whole path at once and draw a single frame.
    pub fn show_path(&mut self, grid: &Grid, cells: &[Position]) {
        self.highlighted = cells.iter().copied().collect();
        self.draw(grid);
    }

    pub fn draw(&self, grid: &Grid) {
        let mut stdout = io::stdout().lock();
        if self.clear_screen {
            let _ = write!(stdout, "\x1B[2J\x1B[1;1H");
        }
        let _ = writeln!(
            stdout,
            "Legend: S=Start, E=End, #=Wall, *=Path, +=Visited, .=Empty"
        );
        let _ = writeln!(stdout, "{}", grid.draw(&self.highlighted));
        let _ = stdout.flush();
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRenderer for TerminalRenderer {
    fn mark_path(&mut self, grid: &Grid, pos: Position) {
        self.highlighted.insert(pos);
        self.draw(grid);
    }

    fn clear_path(&mut self, grid: &Grid) {
        self.highlighted.clear();
        self.draw(grid);
    }
}

/// Keeps every signal it receives; handy for driving a visualizer headless.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub marked: Vec<Position>,
    pub clears: usize,
}

impl PathRenderer for RecordingRenderer {
    fn mark_path(&mut self, _grid: &Grid, pos: Position) {
        self.marked.push(pos);
    }

    fn clear_path(&mut self, _grid: &Grid) {
        self.marked.clear();
        self.clears += 1;
    }
}
