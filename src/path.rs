use crate::grid::{Grid, Position};

/// Start-to-end sequence rebuilt from the `previous` links a search left on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// Follow `previous` from `end` until a node has none, then reverse.
    ///
    /// The walk stops after `grid.len()` cells, so a corrupted chain still
    /// terminates. When the search failed the result does not start at the
    /// start node; use [`Path::connects`] before treating it as a route.
    pub fn reconstruct(grid: &Grid, end: Position) -> Self {
        let mut cells = Vec::new();
        let mut current = Some(end);

        while let Some(pos) = current {
            if cells.len() == grid.len() {
                break;
            }
            cells.push(pos);
            current = grid.node(pos).previous;
        }

        cells.reverse();
        Path { cells }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Position> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn connects(&self, start: Position, end: Position) -> bool {
        self.cells.first() == Some(&start) && self.cells.last() == Some(&end)
    }
}
