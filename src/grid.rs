use std::fmt;

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::error::{Endpoint, PaintConflict, PathError, Result};

/// Distance of a node the search has not reached.
pub const UNREACHED: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance, the A* estimate on a 4-connected grid.
    pub fn manhattan(&self, other: &Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One grid cell: its painted flags plus the annotations a search leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    position: Position,
    pub(crate) is_start: bool,
    pub(crate) is_end: bool,
    pub(crate) is_wall: bool,
    pub distance: u32,
    pub heuristic: u32,
    pub previous: Option<Position>,
    pub is_visited: bool,
}

impl Node {
    fn new(position: Position) -> Self {
        Node {
            position,
            is_start: false,
            is_end: false,
            is_wall: false,
            distance: UNREACHED,
            heuristic: 0,
            previous: None,
            is_visited: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn is_reached(&self) -> bool {
        self.distance != UNREACHED
    }

    /// Combined A* score, distance plus heuristic.
    pub fn score(&self) -> u32 {
        self.distance.saturating_add(self.heuristic)
    }

    fn reset(&mut self) {
        self.distance = UNREACHED;
        self.heuristic = 0;
        self.previous = None;
        self.is_visited = false;
    }
}

/// Fixed-size grid of nodes stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let nodes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Node::new(Position { row, col })))
            .collect();

        Grid {
            rows,
            cols,
            nodes,
            start: None,
            end: None,
        }
    }

    /// Build a grid from an ASCII layout: `S` start, `E` end, `#` wall, `.` open.
    /// Blank lines are ignored; every row must have the same width.
    pub fn from_ascii(layout: &str) -> Result<Self> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(PathError::Layout("layout is empty".to_string()));
        }

        let mut grid = Grid::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(PathError::Layout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                )));
            }
            for (col, glyph) in line.chars().enumerate() {
                let pos = Position { row, col };
                match glyph {
                    '.' => {}
                    '#' => grid.set_wall(pos)?,
                    'S' if grid.start.is_some() => {
                        return Err(PathError::Layout(format!("second start cell at {}", pos)));
                    }
                    'S' => grid.set_start(pos)?,
                    'E' if grid.end.is_some() => {
                        return Err(PathError::Layout(format!("second end cell at {}", pos)));
                    }
                    'E' => grid.set_end(pos)?,
                    other => {
                        return Err(PathError::Layout(format!(
                            "unexpected '{}' at {}",
                            other, pos
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Reject coordinates outside the grid before they reach node storage.
    pub fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(PathError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub(crate) fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{} outside grid", pos);
        pos.row * self.cols + pos.col
    }

    pub(crate) fn position(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    /// Panics if `pos` is outside the grid.
    pub fn node(&self, pos: Position) -> &Node {
        &self.nodes[self.index(pos)]
    }

    pub fn node_mut(&mut self, pos: Position) -> &mut Node {
        let index = self.index(pos);
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Both endpoints, or the first one that is missing.
    pub fn endpoints(&self) -> Result<(Position, Position)> {
        let start = self.start.ok_or(PathError::MissingEndpoint(Endpoint::Start))?;
        let end = self.end.ok_or(PathError::MissingEndpoint(Endpoint::End))?;
        Ok((start, end))
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_wall).count()
    }

    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_visited).count()
    }

    /// Orthogonal neighbors in up, down, left, right order. Walls are included;
    /// the searches decide what to do with them.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);

        if pos.row > 0 {
            neighbors.push(Position { row: pos.row - 1, col: pos.col });
        }
        if pos.row + 1 < self.rows {
            neighbors.push(Position { row: pos.row + 1, col: pos.col });
        }
        if pos.col > 0 {
            neighbors.push(Position { row: pos.row, col: pos.col - 1 });
        }
        if pos.col + 1 < self.cols {
            neighbors.push(Position { row: pos.row, col: pos.col + 1 });
        }
        neighbors
    }

    /// Forget search annotations; walls and endpoints stay.
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset);
    }

    /// Reset plus remove every wall and endpoint.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.reset();
            node.is_start = false;
            node.is_end = false;
            node.is_wall = false;
        }
        self.start = None;
        self.end = None;
    }

    /// Move the start marker to `pos`. A wall on `pos` is replaced.
    pub fn set_start(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        if self.end == Some(pos) {
            return Err(PathError::InvalidPaint {
                pos,
                conflict: PaintConflict::StartOverEnd,
            });
        }
        if let Some(previous) = self.start.take() {
            self.node_mut(previous).is_start = false;
        }
        let node = self.node_mut(pos);
        node.is_wall = false;
        node.is_start = true;
        self.start = Some(pos);
        Ok(())
    }

    /// Move the end marker to `pos`. A wall on `pos` is replaced.
    pub fn set_end(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        if self.start == Some(pos) {
            return Err(PathError::InvalidPaint {
                pos,
                conflict: PaintConflict::EndOverStart,
            });
        }
        if let Some(previous) = self.end.take() {
            self.node_mut(previous).is_end = false;
        }
        let node = self.node_mut(pos);
        node.is_wall = false;
        node.is_end = true;
        self.end = Some(pos);
        Ok(())
    }

    pub fn set_wall(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        let conflict = if self.start == Some(pos) {
            Some(PaintConflict::WallOverStart)
        } else if self.end == Some(pos) {
            Some(PaintConflict::WallOverEnd)
        } else {
            None
        };
        if let Some(conflict) = conflict {
            return Err(PathError::InvalidPaint { pos, conflict });
        }
        self.node_mut(pos).is_wall = true;
        Ok(())
    }

    pub fn remove_wall(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        self.node_mut(pos).is_wall = false;
        Ok(())
    }

    /// Remove whatever is painted on `pos`.
    pub fn erase(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
        let node = self.node_mut(pos);
        node.is_start = false;
        node.is_end = false;
        node.is_wall = false;
        Ok(())
    }

    /// Place up to `count` walls on random open cells, never on the start or end.
    /// Returns how many were placed.
    pub fn scatter_walls<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < count && attempts < count * 3 {
            let pos = Position {
                row: rng.gen_range(0..self.rows),
                col: rng.gen_range(0..self.cols),
            };
            let node = self.node(pos);
            if !node.is_start && !node.is_end && !node.is_wall {
                self.node_mut(pos).is_wall = true;
                walls_placed += 1;
            }
            attempts += 1;
        }
        walls_placed
    }

    /// Text frame of the grid with `path` cells highlighted.
    pub fn draw(&self, path: &FxHashSet<Position>) -> String {
        let mut out = String::with_capacity((self.cols * 2 + 4) * (self.rows + 2));
        out.push_str("   ");
        for col in 0..self.cols {
            out.push_str(&format!("{:2}", col % 10));
        }
        out.push('\n');

        for row in 0..self.rows {
            out.push_str(&format!("{:2} ", row));
            for col in 0..self.cols {
                let pos = Position { row, col };
                out.push(' ');
                out.push(self.glyph(pos, path.contains(&pos)));
            }
            out.push('\n');
        }
        out
    }

    fn glyph(&self, pos: Position, on_path: bool) -> char {
        let node = self.node(pos);
        if node.is_start {
            'S'
        } else if node.is_end {
            'E'
        } else if node.is_wall {
            '#'
        } else if on_path {
            '*'
        } else if node.is_visited {
            '+'
        } else {
            '.'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_corner_has_two_neighbors() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.neighbors(pos(0, 0)), vec![pos(1, 0), pos(0, 1)]);
        assert_eq!(grid.neighbors(pos(4, 4)).len(), 2);
    }

    #[test]
    fn test_edge_has_three_neighbors() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.neighbors(pos(0, 2)).len(), 3);
        assert_eq!(grid.neighbors(pos(2, 4)).len(), 3);
    }

    #[test]
    fn test_interior_has_four_neighbors_in_order() {
        let grid = Grid::new(5, 5);
        assert_eq!(
            grid.neighbors(pos(2, 2)),
            vec![pos(1, 2), pos(3, 2), pos(2, 1), pos(2, 3)]
        );
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1);
        assert!(grid.neighbors(pos(0, 0)).is_empty());
    }

    #[test]
    fn test_reset_keeps_walls_and_is_idempotent() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(2, 2)).unwrap();
        grid.set_wall(pos(1, 1)).unwrap();
        {
            let node = grid.node_mut(pos(0, 1));
            node.distance = 3;
            node.heuristic = 2;
            node.previous = Some(pos(0, 0));
            node.is_visited = true;
        }

        grid.reset();
        let once = grid.clone();
        grid.reset();

        assert_eq!(grid.nodes().collect::<Vec<_>>(), once.nodes().collect::<Vec<_>>());
        assert!(grid.node(pos(1, 1)).is_wall());
        assert_eq!(grid.endpoints().unwrap(), (pos(0, 0), pos(2, 2)));
        let node = grid.node(pos(0, 1));
        assert_eq!(node.distance, UNREACHED);
        assert_eq!(node.heuristic, 0);
        assert_eq!(node.previous, None);
        assert!(!node.is_visited);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(2, 2)).unwrap();
        grid.set_wall(pos(1, 1)).unwrap();

        grid.clear();

        assert_eq!(grid.start(), None);
        assert_eq!(grid.end(), None);
        assert_eq!(grid.wall_count(), 0);
        assert!(grid.nodes().all(|n| !n.is_start() && !n.is_end()));
    }

    #[test]
    fn test_new_start_replaces_previous_start() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_start(pos(1, 2)).unwrap();

        assert!(!grid.node(pos(0, 0)).is_start());
        assert!(grid.node(pos(1, 2)).is_start());
        assert_eq!(grid.nodes().filter(|n| n.is_start()).count(), 1);
    }

    #[test]
    fn test_wall_over_endpoint_is_rejected() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(2, 2)).unwrap();

        let err = grid.set_wall(pos(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidPaint { conflict: PaintConflict::WallOverStart, .. }
        ));
        let err = grid.set_wall(pos(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidPaint { conflict: PaintConflict::WallOverEnd, .. }
        ));
        assert_eq!(grid.wall_count(), 0);
        assert!(grid.node(pos(0, 0)).is_start());
    }

    #[test]
    fn test_endpoint_over_wall_replaces_wall() {
        let mut grid = Grid::new(3, 3);
        grid.set_wall(pos(1, 1)).unwrap();
        grid.set_end(pos(1, 1)).unwrap();

        assert!(!grid.node(pos(1, 1)).is_wall());
        assert!(grid.node(pos(1, 1)).is_end());
    }

    #[test]
    fn test_start_and_end_cannot_share_a_cell() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(1, 1)).unwrap();
        assert!(matches!(
            grid.set_end(pos(1, 1)),
            Err(PathError::InvalidPaint { conflict: PaintConflict::EndOverStart, .. })
        ));
        assert_eq!(grid.end(), None);
    }

    #[test]
    fn test_out_of_bounds_paint_is_rejected() {
        let mut grid = Grid::new(3, 4);
        assert!(matches!(
            grid.set_wall(pos(3, 0)),
            Err(PathError::OutOfBounds { rows: 3, cols: 4, .. })
        ));
        assert!(grid.set_start(pos(0, 4)).is_err());
    }

    #[test]
    fn test_erase_forgets_endpoint() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(pos(0, 0)).unwrap();
        grid.erase(pos(0, 0)).unwrap();

        assert_eq!(grid.start(), None);
        assert!(matches!(
            grid.endpoints(),
            Err(PathError::MissingEndpoint(Endpoint::Start))
        ));
    }

    #[test]
    fn test_from_ascii_layout() {
        let grid = Grid::from_ascii(
            "
            S.#
            ..#
            ..E
            ",
        )
        .unwrap();

        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.endpoints().unwrap(), (pos(0, 0), pos(2, 2)));
        assert_eq!(grid.wall_count(), 2);
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows_and_duplicates() {
        assert!(matches!(Grid::from_ascii("S..\n..\n"), Err(PathError::Layout(_))));
        assert!(matches!(Grid::from_ascii("S.S\n..E\n"), Err(PathError::Layout(_))));
        assert!(matches!(Grid::from_ascii("S.x\n..E\n"), Err(PathError::Layout(_))));
        assert!(matches!(Grid::from_ascii("\n\n"), Err(PathError::Layout(_))));
    }

    #[test]
    fn test_scatter_walls_avoids_endpoints() {
        let mut grid = Grid::new(6, 6);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(5, 5)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let placed = grid.scatter_walls(34, &mut rng);

        assert_eq!(grid.wall_count(), placed);
        assert!(!grid.node(pos(0, 0)).is_wall());
        assert!(!grid.node(pos(5, 5)).is_wall());
    }

    #[test]
    fn test_draw_marks_path_cells() {
        let grid = Grid::from_ascii("S.E\n.#.\n").unwrap();
        let path: FxHashSet<Position> = [pos(0, 1)].into_iter().collect();

        let frame = grid.draw(&path);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " 0  S * E");
        assert_eq!(lines[2], " 1  . # .");
    }
}
