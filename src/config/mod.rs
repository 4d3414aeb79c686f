//! Configuration management for the simulation

pub mod settings;

pub use settings::{
    CliOverrides, GridConfig, InputConfig, NeighborRule, OutputConfig, OutputFormat, Settings,
    SimulationConfig,
};
