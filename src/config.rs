use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::error::{PathError, Result};
use crate::grid::{Grid, Position};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 30)]
    pub rows: usize,

    #[arg(long, default_value_t = 45)]
    pub cols: usize,

    /// "dijkstra", "a-star", or "all" to compare both
    #[arg(long, default_value = "a-star")]
    pub algorithm: String,

    /// Start cell as "row,col"
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// End cell as "row,col"
    #[arg(long, value_parser = parse_position)]
    pub end: Option<Position>,

    /// Wall cell as "row,col"; repeat for more walls
    #[arg(long = "wall", value_parser = parse_position)]
    pub walls: Vec<Position>,

    /// Number of walls to scatter at random
    #[arg(long, default_value_t = 0)]
    pub num_walls: usize,

    /// Seed for the random walls
    #[arg(long)]
    pub seed: Option<u64>,

    /// ASCII layout file (S start, E end, # wall, . open); overrides --rows/--cols
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

/// Parse a "row,col" pair.
pub fn parse_position(s: &str) -> std::result::Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"row,col\", got \"{}\"", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row \"{}\": {}", row.trim(), e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column \"{}\": {}", col.trim(), e))?;
    Ok(Position { row, col })
}

impl Config {
    /// Paint the grid described by the command line.
    ///
    /// Start and end must lie inside the grid. Walls that are out of bounds
    /// or would cover an endpoint are skipped with a warning.
    pub fn build_grid(&self) -> Result<Grid> {
        let mut grid = match &self.map {
            Some(path) => {
                info!("Loading layout from {:?}", path);
                Grid::from_ascii(&fs::read_to_string(path)?)?
            }
            None => Grid::new(self.rows, self.cols),
        };

        if let Some(start) = self.start {
            grid.set_start(start)?;
        }
        if let Some(end) = self.end {
            grid.set_end(end)?;
        }

        for &wall in &self.walls {
            match grid.set_wall(wall) {
                Ok(()) => {}
                Err(e @ (PathError::InvalidPaint { .. } | PathError::OutOfBounds { .. })) => {
                    warn!("Skipping wall: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        if self.num_walls > 0 {
            let mut rng = match self.seed {
                Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
                None => rand::rngs::StdRng::from_entropy(),
            };
            let placed = grid.scatter_walls(self.num_walls, &mut rng);
            info!("Scattered {} of {} random walls", placed, self.num_walls);
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("pathfinding_visualizer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_position(" 0 , 12 "), Ok(Position::new(0, 12)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("1,-2").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!((config.rows, config.cols), (30, 45));
        assert_eq!(config.algorithm, "a-star");
        assert_eq!(config.delay_ms, 100);
        assert!(config.start.is_none() && config.end.is_none());
    }

    #[test]
    fn test_build_grid_paints_endpoints_and_walls() {
        let config = config(&[
            "--rows", "5", "--cols", "5", "--start", "0,0", "--end", "0,4", "--wall", "0,2",
            "--wall", "0,0", "--wall", "7,7",
        ]);

        let grid = config.build_grid().unwrap();

        assert_eq!(grid.endpoints().unwrap(), (Position::new(0, 0), Position::new(0, 4)));
        assert_eq!(grid.wall_count(), 1);
        assert!(grid.node(Position::new(0, 2)).is_wall());
    }

    #[test]
    fn test_build_grid_rejects_out_of_bounds_start() {
        let config = config(&["--rows", "3", "--cols", "3", "--start", "3,0"]);
        assert!(matches!(config.build_grid(), Err(PathError::OutOfBounds { .. })));
    }

    #[test]
    fn test_seeded_random_walls_are_reproducible() {
        let args = [
            "--rows", "10", "--cols", "10", "--start", "0,0", "--end", "9,9", "--num-walls", "30",
            "--seed", "42",
        ];
        let first = config(&args).build_grid().unwrap();
        let second = config(&args).build_grid().unwrap();

        let walls = |grid: &Grid| {
            grid.nodes()
                .filter(|n| n.is_wall())
                .map(|n| n.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(walls(&first), walls(&second));
        assert!(!walls(&first).is_empty());
    }
}
