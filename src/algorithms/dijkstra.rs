use crate::algorithms::common::{PathfindingAlgorithm, SearchOutcome};
use crate::grid::{Grid, Position};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Entry in the unvisited queue. `Ord` is reversed so the `BinaryHeap` pops
/// the smallest distance first, and among equal distances the lowest
/// row-major index.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Unvisited {
    distance: u32,
    index: usize,
}

impl Ord for Unvisited {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Unvisited {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over unit-cost orthogonal moves.
#[derive(Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn search(&mut self, grid: &mut Grid, start: Position, end: Position) -> SearchOutcome {
        debug!("Starting Dijkstra from {} to {}", start, end);
        grid.node_mut(start).distance = 0;

        // Only reached nodes are ever queued, so running out of entries is the
        // same as the next-closest node being unreachable.
        let mut unvisited = BinaryHeap::new();
        unvisited.push(Unvisited {
            distance: 0,
            index: grid.index(start),
        });

        while let Some(Unvisited { distance, index }) = unvisited.pop() {
            let current = grid.position(index);
            let node = grid.node(current);

            // Superseded by a shorter distance pushed later.
            if node.is_visited || node.distance != distance {
                continue;
            }
            if node.is_wall() {
                continue;
            }

            grid.node_mut(current).is_visited = true;

            if current == end {
                debug!(
                    "Dijkstra reached {} at distance {} after visiting {} nodes",
                    end,
                    distance,
                    grid.visited_count()
                );
                return SearchOutcome::Reached;
            }

            for neighbor in grid.neighbors(current) {
                let index = grid.index(neighbor);
                let candidate = distance + 1;
                let node = grid.node_mut(neighbor);
                if node.is_visited || candidate >= node.distance {
                    continue;
                }
                node.distance = candidate;
                node.previous = Some(current);
                unvisited.push(Unvisited {
                    distance: candidate,
                    index,
                });
            }
        }

        debug!(
            "Dijkstra exhausted the reachable area after visiting {} nodes",
            grid.visited_count()
        );
        SearchOutcome::Exhausted
    }
}
