use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pathfinding_visualizer::algorithms::Algorithm;
use pathfinding_visualizer::animation::SleepTicker;
use pathfinding_visualizer::config::Config;
use pathfinding_visualizer::render::{PathRenderer, TerminalRenderer};
use pathfinding_visualizer::statistics::{self, RunStats};
use pathfinding_visualizer::visualizer::{RunOutcome, Visualizer};
use pathfinding_visualizer::Result;
use std::time::Duration;

fn main() {
    let config = Config::parse();

    let default_filter = if config.quiet {
        "pathfinding_visualizer=warn"
    } else {
        "pathfinding_visualizer=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(config) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    let grid = config.build_grid()?;

    if !config.quiet {
        println!("Starting pathfinding visualizer...");
        println!("Grid size: {}x{}", grid.rows(), grid.cols());
        println!("Walls: {}", grid.wall_count());
        println!("Algorithm: {}", config.algorithm);
        if config.no_visualization {
            println!("Visualization disabled - printing the final path only");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
        }
        println!();
    }

    let mut visualizer = Visualizer::with_step_delay(grid, Duration::from_millis(config.delay_ms));

    if config.algorithm == "all" {
        let mut results = Vec::new();
        for algorithm in Algorithm::ALL {
            let report = visualizer.run(algorithm)?;
            results.push(RunStats::from_report(&report, visualizer.grid()));
        }
        statistics::print_comparison_results(&results);
        return Ok(());
    }

    let algorithm: Algorithm = config.algorithm.parse()?;
    let report = visualizer.run(algorithm)?;
    let stats = RunStats::from_report(&report, visualizer.grid());

    let mut renderer = if config.no_visualization {
        TerminalRenderer::scrolling()
    } else {
        TerminalRenderer::new()
    };

    match report.outcome {
        RunOutcome::PathFound(mut animation) => {
            if config.no_visualization {
                renderer.show_path(visualizer.grid(), animation.path());
            } else {
                renderer.clear_path(visualizer.grid());
                visualizer.play(&mut animation, &mut renderer, &mut SleepTicker);
            }
        }
        RunOutcome::NoPathFound => {
            renderer.clear_path(visualizer.grid());
            println!("No path found from {} to {}", report.start, report.end);
        }
    }

    println!("\n=== FINAL RESULTS ===");
    println!("{}", stats);
    Ok(())
}
