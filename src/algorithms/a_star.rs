use crate::algorithms::common::{PathfindingAlgorithm, SearchOutcome};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Open-set entry. Reversed `Ord` turns the `BinaryHeap` into a min-heap on
/// the combined score; equal scores pop in the order the nodes first joined
/// the open set.
#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    score: u32,
    order: u64,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search guided by the Manhattan distance to the end node.
#[derive(Default)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a-star"
    }

    /// Finds the end node with A*.
    ///
    /// Each node keeps its `distance` from the start and its `heuristic`
    /// estimate to the end; the open set is ordered by their sum. A node that
    /// improves while already open keeps its original insertion order.
    fn search(&mut self, grid: &mut Grid, start: Position, end: Position) -> SearchOutcome {
        debug!("Starting A* from {} to {}", start, end);

        let start_index = grid.index(start);
        let start_score = {
            let node = grid.node_mut(start);
            node.distance = 0;
            node.heuristic = start.manhattan(&end);
            node.score()
        };

        // Membership of the open set, mapped to each node's insertion order.
        let mut open_set: FxHashMap<usize, u64> = FxHashMap::default();
        let mut queue = BinaryHeap::new();
        open_set.insert(start_index, 0);
        queue.push(OpenEntry {
            score: start_score,
            order: 0,
            index: start_index,
        });
        let mut next_order = 1;

        while let Some(entry) = queue.pop() {
            let current = grid.position(entry.index);

            // Entries left behind by a score improvement are stale.
            if !open_set.contains_key(&entry.index) || grid.node(current).score() != entry.score {
                continue;
            }
            open_set.remove(&entry.index);

            if grid.node(current).is_wall() {
                continue;
            }
            if current == end {
                debug!(
                    "A* reached {} at distance {} after visiting {} nodes",
                    end,
                    grid.node(current).distance,
                    grid.visited_count()
                );
                return SearchOutcome::Reached;
            }

            let current_distance = {
                let node = grid.node_mut(current);
                node.is_visited = true;
                node.distance
            };

            for neighbor in grid.neighbors(current) {
                let index = grid.index(neighbor);
                let tentative = current_distance + 1;
                let node = grid.node_mut(neighbor);
                if node.is_visited || tentative >= node.distance {
                    continue;
                }
                node.distance = tentative;
                node.heuristic = neighbor.manhattan(&end);
                node.previous = Some(current);
                let score = node.score();

                let order = *open_set.entry(index).or_insert_with(|| {
                    let order = next_order;
                    next_order += 1;
                    order
                });
                queue.push(OpenEntry {
                    score,
                    order,
                    index,
                });
            }
        }

        debug!(
            "A* emptied its open set after visiting {} nodes",
            grid.visited_count()
        );
        SearchOutcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn run(grid: &mut Grid) -> (SearchOutcome, Path) {
        let (start, end) = grid.endpoints().unwrap();
        let outcome = AStar::new().search(grid, start, end);
        (outcome, Path::reconstruct(grid, end))
    }

    #[test]
    fn test_straight_line_on_open_grid() {
        let mut grid = Grid::new(5, 5);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(0, 4)).unwrap();

        let (outcome, path) = run(&mut grid);

        assert_eq!(outcome, SearchOutcome::Reached);
        assert_eq!(
            path.cells(),
            &[pos(0, 0), pos(0, 1), pos(0, 2), pos(0, 3), pos(0, 4)]
        );
    }

    #[test]
    fn test_heuristic_guides_search() {
        let mut grid = Grid::new(5, 5);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(0, 4)).unwrap();

        run(&mut grid);

        // Only the straight corridor has a score of 4; nothing below it is expanded.
        assert_eq!(grid.visited_count(), 4);
        assert_eq!(grid.node(pos(0, 0)).heuristic, 4);
        assert_eq!(grid.node(pos(0, 3)).heuristic, 1);
    }

    #[test]
    fn test_detour_around_wall_column() {
        let mut grid = Grid::from_ascii(
            "
            S.#.E
            ..#..
            ..#..
            ..#..
            .....
            ",
        )
        .unwrap();

        let (outcome, path) = run(&mut grid);

        assert_eq!(outcome, SearchOutcome::Reached);
        assert_eq!(path.len(), 13);
        assert_eq!(path.cells()[6], pos(4, 2));
    }

    #[test]
    fn test_ties_resolve_in_insertion_order() {
        let mut grid = Grid::new(5, 5);
        grid.set_start(pos(0, 0)).unwrap();
        grid.set_end(pos(4, 4)).unwrap();

        let (_, path) = run(&mut grid);

        // Every cell scores 8, so the open set drains first-in first-out and
        // the "down" neighbor of the start is expanded ahead of "right".
        let expected: Vec<Position> = (0..5)
            .map(|row| pos(row, 0))
            .chain((1..5).map(|col| pos(4, col)))
            .collect();
        assert_eq!(path.cells(), expected.as_slice());
    }

    #[test]
    fn test_enclosed_start_is_exhausted() {
        let mut grid = Grid::from_ascii(
            "
            ....
            .#..
            #S#.
            .#.E
            ",
        )
        .unwrap();

        let (outcome, path) = run(&mut grid);

        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_ne!(path.cells().first(), Some(&pos(2, 1)));
        assert!(grid.nodes().filter(|n| n.is_wall()).all(|n| !n.is_visited));
    }

    #[test]
    fn test_end_is_not_marked_visited() {
        let mut grid = Grid::from_ascii("S.E\n").unwrap();

        let (outcome, _) = run(&mut grid);

        assert_eq!(outcome, SearchOutcome::Reached);
        assert!(!grid.node(pos(0, 2)).is_visited);
        assert_eq!(grid.node(pos(0, 2)).distance, 2);
    }

    #[test]
    fn test_start_equal_to_end() {
        let mut grid = Grid::new(2, 2);
        let outcome = AStar::new().search(&mut grid, pos(1, 0), pos(1, 0));

        assert_eq!(outcome, SearchOutcome::Reached);
        assert_eq!(Path::reconstruct(&grid, pos(1, 0)).cells(), &[pos(1, 0)]);
        assert_eq!(grid.visited_count(), 0);
    }
}
