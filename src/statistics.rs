use std::fmt;
use std::time::Duration;

use pathfinding::prelude::bfs;

use crate::grid::{Grid, Position};
use crate::visualizer::RunReport;

/// Summary of one run, compared against an independently computed optimum.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub algorithm: String,
    pub found: bool,
    pub path_steps: Option<usize>,
    pub optimal_steps: Option<usize>,
    pub visited: usize,
    pub num_walls: usize,
    pub search_time: Duration,
}

impl RunStats {
    pub fn from_report(report: &RunReport, grid: &Grid) -> Self {
        RunStats {
            algorithm: report.algorithm.to_string(),
            found: report.found(),
            path_steps: report.path_len().map(|len| len.saturating_sub(1)),
            optimal_steps: optimal_steps(grid, report.start, report.end),
            visited: report.visited,
            num_walls: grid.wall_count(),
            search_time: report.elapsed,
        }
    }

    /// Path steps over optimal steps; 1.0 for an optimal path.
    pub fn route_efficiency(&self) -> Option<f64> {
        match (self.path_steps, self.optimal_steps) {
            (Some(_), Some(0)) => Some(1.0),
            (Some(steps), Some(optimal)) => Some(steps as f64 / optimal as f64),
            _ => None,
        }
    }
}

/// Shortest number of moves between two cells, walls excluded, using the
/// breadth-first search from the `pathfinding` crate.
pub fn optimal_steps(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    bfs(
        &start,
        |p| {
            grid.neighbors(*p)
                .into_iter()
                .filter(|n| !grid.node(*n).is_wall())
                .collect::<Vec<_>>()
        },
        |p| *p == end,
    )
    .map(|path| path.len().saturating_sub(1))
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Path Found: {}", if self.found { "yes" } else { "no" })?;
        writeln!(f, "Path Steps: {}", or_dash(self.path_steps))?;
        writeln!(f, "Optimal Steps: {}", or_dash(self.optimal_steps))?;
        writeln!(f, "Nodes Visited: {}", self.visited)?;
        writeln!(f, "Number of Walls: {}", self.num_walls)?;
        writeln!(f, "Search Time: {:.2?}", self.search_time)?;

        if let Some(efficiency) = self.route_efficiency() {
            writeln!(f, "Route Efficiency: {:.3}", efficiency)?;
        }

        Ok(())
    }
}

/// Print a side-by-side table of several runs on the same layout.
pub fn print_comparison_results(results: &[RunStats]) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();
    println!(
        "{:<10} {:<8} {:<8} {:<8} {:<10} {:<12}",
        "Algorithm", "Success", "Steps", "Optimal", "Visited", "Search Time"
    );
    println!("{}", "-".repeat(60));

    for result in results {
        let success_str = if result.found { "✓" } else { "✗" };
        println!(
            "{:<10} {:<8} {:<8} {:<8} {:<10} {:<12}",
            result.algorithm,
            success_str,
            or_dash(result.path_steps),
            or_dash(result.optimal_steps),
            result.visited,
            format!("{:.2?}", result.search_time)
        );
    }
    println!();

    let successful: Vec<&RunStats> = results.iter().filter(|r| r.found).collect();
    if successful.is_empty() {
        println!("No algorithm reached the end cell.");
        return;
    }

    if let Some(fewest_visited) = successful.iter().min_by_key(|r| r.visited) {
        println!(
            "Fewest nodes visited: {} ({} nodes)",
            fewest_visited.algorithm, fewest_visited.visited
        );
    }
    if let Some(fastest) = successful.iter().min_by_key(|r| r.search_time) {
        println!(
            "Fastest search: {} ({:.2?})",
            fastest.algorithm, fastest.search_time
        );
    }

    let lengths: Vec<usize> = successful.iter().filter_map(|r| r.path_steps).collect();
    if lengths.windows(2).all(|pair| pair[0] == pair[1]) {
        println!("All algorithms agree on the path length.");
    } else {
        println!("Path lengths differ: {:?}", lengths);
    }
}
