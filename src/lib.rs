//! Game of Life Simulation Engine
//!
//! This library provides a bounded Game of Life grid engine with generation
//! counting, stability/oscillation detection, per-cell change observers and a
//! cancellable background stepping worker.

pub mod config;
pub mod engine;
pub mod runner;
pub mod utils;

pub use config::{NeighborRule, Settings};
pub use engine::{CellChange, EngineError, Grid, LifeRules, Simulation, Stability, StepReport};
pub use runner::{RunOutcome, RunnerConfig, RunnerHandle, SimulationRunner};

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Build a simulation from settings: the configured pattern file when one is
/// set, otherwise a uniform grid of the configured size.
pub fn build_simulation(settings: &Settings) -> Result<Simulation> {
    let grid = match settings.input.pattern_file {
        Some(ref path) => engine::load_pattern(path, settings.simulation.neighbor_rule)
            .with_context(|| format!("Failed to load pattern from {}", path.display()))?,
        None => Grid::new(
            settings.grid.cols,
            settings.grid.rows,
            settings.grid.initial_alive,
            settings.simulation.neighbor_rule,
        )?,
    };
    Ok(Simulation::new(grid))
}

/// Run a simulation to completion with the background stepping worker.
pub fn run_simulation(settings: Settings) -> Result<RunOutcome> {
    settings.validate()?;

    let simulation = Arc::new(Mutex::new(build_simulation(&settings)?));
    let config = RunnerConfig {
        frame_duration: Duration::from_millis(settings.simulation.frame_duration_ms),
        max_generations: settings.simulation.max_generations,
    };

    SimulationRunner::spawn(simulation, config, |_, _| {}).join()
}
