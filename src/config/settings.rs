//! Configuration settings for the Game of Life simulation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    /// Fill value for freshly created cells; `clear` restores this value.
    pub initial_alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Pause between generation steps in the background worker.
    pub frame_duration_ms: u64,
    /// Optional hard cap on generations; `None` runs until convergence or
    /// cancellation.
    pub max_generations: Option<u64>,
    pub neighbor_rule: NeighborRule,
}

/// How neighbor counting treats cells near the low-index grid edges.
///
/// `Legacy` keeps a historical off-by-one: the `row - 1` and `col - 1`
/// lookups were guarded with a strict `> 0` test, so cells in row 1 or
/// column 1 never saw their index-0 neighbors. `Bounded` is the corrected
/// behavior and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborRule {
    Bounded,
    Legacy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Optional pattern file seeding the initial grid; when absent the grid
    /// starts uniformly at `initial_alive`.
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                cols: 20,
                rows: 20,
                initial_alive: false,
            },
            simulation: SimulationConfig {
                frame_duration_ms: 300,
                max_generations: None,
                neighbor_rule: NeighborRule::Bounded,
            },
            input: InputConfig { pattern_file: None },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.cols == 0 || self.grid.rows == 0 {
            anyhow::bail!("Grid dimensions must be positive");
        }

        if self.simulation.frame_duration_ms == 0 {
            anyhow::bail!("Frame duration must be positive");
        }

        if let Some(ref pattern) = self.input.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(cols) = cli_overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(frame_duration_ms) = cli_overrides.frame_duration_ms {
            self.simulation.frame_duration_ms = frame_duration_ms;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(max_generations);
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub cols: Option<usize>,
    pub rows: Option<usize>,
    pub frame_duration_ms: Option<u64>,
    pub max_generations: Option<u64>,
    pub pattern_file: Option<PathBuf>,
}
