//! CLI front end for the Game of Life simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, OutputFormat, Settings},
    engine::{self, Simulation},
    runner::{RunnerConfig, SimulationRunner},
    utils::{ColorOutput, GridRenderer},
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Game of Life simulation engine")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation until it converges, hits the generation cap or is
    /// interrupted
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file seeding the grid (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Frame duration in milliseconds (overrides config)
        #[arg(short, long)]
        frame_ms: Option<u64>,

        /// Maximum generations to run (overrides config)
        #[arg(short, long)]
        max_generations: Option<u64>,

        /// Print the grid after every generation
        #[arg(long)]
        show_grid: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Advance a pattern a fixed number of generations and print the result
    Evolve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file to evolve
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Save the evolved pattern to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            pattern,
            frame_ms,
            max_generations,
            show_grid,
            verbose,
        } => run_command(config, pattern, frame_ms, max_generations, show_grid, verbose),
        Commands::Evolve {
            config,
            pattern,
            generations,
            output,
        } => evolve_command(config, pattern, generations, output),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    pattern: Option<PathBuf>,
    frame_ms: Option<u64>,
    max_generations: Option<u64>,
    show_grid: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        frame_duration_ms: frame_ms,
        max_generations,
        pattern_file: pattern,
        ..Default::default()
    };
    settings.merge_with_cli(&cli_overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Grid: {}x{}", settings.grid.cols, settings.grid.rows);
        println!("  Frame duration: {}ms", settings.simulation.frame_duration_ms);
        println!("  Neighbor rule: {:?}", settings.simulation.neighbor_rule);
        match settings.input.pattern_file {
            Some(ref path) => println!("  Pattern: {}", path.display()),
            None => println!("  Pattern: none (uniform grid)"),
        }
        println!();
    }

    let simulation = Arc::new(Mutex::new(
        game_of_life_sim::build_simulation(&settings).context("Failed to build simulation")?,
    ));

    println!("{}", ColorOutput::info("Starting simulation..."));
    if show_grid {
        let sim = simulation
            .lock()
            .map_err(|_| anyhow::anyhow!("simulation lock poisoned"))?;
        println!("{}", GridRenderer::format_grid(sim.grid()));
    }

    let runner_config = RunnerConfig {
        frame_duration: Duration::from_millis(settings.simulation.frame_duration_ms),
        max_generations: settings.simulation.max_generations,
    };

    let handle = SimulationRunner::spawn(
        Arc::clone(&simulation),
        runner_config,
        move |sim: &Simulation, report| {
            if show_grid {
                println!("Generation {}:", report.generation);
                println!("{}", GridRenderer::format_grid(sim.grid()));
            }
        },
    );

    let outcome = handle.join().context("Stepping worker failed")?;

    match settings.output.format {
        OutputFormat::Text => {
            println!("{}", ColorOutput::success(&GridRenderer::format_outcome(&outcome)));
            let sim = simulation
                .lock()
                .map_err(|_| anyhow::anyhow!("simulation lock poisoned"))?;
            println!("Living cells: {}", sim.grid().living_count());
        }
        OutputFormat::Json => {
            let summary =
                serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
            println!("{}", summary);
        }
    }

    Ok(())
}

fn evolve_command(
    config_path: PathBuf,
    pattern_path: PathBuf,
    generations: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&config_path)?;

    let grid = engine::load_pattern(&pattern_path, settings.simulation.neighbor_rule)
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    let mut simulation = Simulation::new(grid);
    for _ in 0..generations {
        let report = simulation.step();
        if report.halt {
            println!(
                "{}",
                ColorOutput::info(&format!("Stable at generation {}, stopping early", report.generation))
            );
            break;
        }
    }

    println!("After {} generation(s):", simulation.generation());
    println!("{}", GridRenderer::format_grid_compact(simulation.grid()));
    if let Some(stability) = simulation.stability() {
        println!("{:?}", stability);
    }

    if let Some(ref output_path) = output {
        engine::save_pattern(simulation.grid(), output_path)
            .with_context(|| format!("Failed to save pattern to {}", output_path.display()))?;
        println!(
            "{}",
            ColorOutput::success(&format!("Saved to {}", output_path.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("input/patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    engine::create_example_patterns(&patterns_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit the configuration in {}", config_path.display());
    println!("2. Run: cargo run -- run --pattern input/patterns/glider.txt --show-grid");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_sim",
            "run",
            "--config",
            "test.yaml",
            "--max-generations",
            "5",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/patterns/blinker.txt").exists());
    }

    #[test]
    fn test_evolve_command_with_output() {
        let temp_dir = tempdir().unwrap();
        let pattern_path = temp_dir.path().join("blinker.txt");
        std::fs::write(&pattern_path, "00000\n00000\n01110\n00000\n00000\n").unwrap();

        let output_path = temp_dir.path().join("evolved.txt");
        let result = evolve_command(
            temp_dir.path().join("missing.yaml"),
            pattern_path,
            1,
            Some(output_path.clone()),
        );

        assert!(result.is_ok());
        let evolved = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(evolved, "00000\n00100\n00100\n00100\n00000\n");
    }
}
