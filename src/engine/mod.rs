//! Grid engine: cell matrix, transition rule and convergence tracking

pub mod error;
pub mod grid;
pub mod io;
pub mod rules;
pub mod state;

pub use error::EngineError;
pub use grid::Grid;
pub use io::{create_example_patterns, load_pattern, parse_pattern, pattern_to_string, save_pattern};
pub use rules::LifeRules;
pub use state::{CellChange, Simulation, Stability, StepReport};
