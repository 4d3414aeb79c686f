//! Error types for the grid engine

use thiserror::Error;

/// Errors raised by grid construction and cell access.
///
/// Both variants are contract violations on the caller's side; the engine
/// never clamps coordinates or retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Grid construction was attempted with a zero-sized dimension.
    #[error("invalid grid dimensions {cols}x{rows}: both must be positive")]
    InvalidDimension { cols: usize, rows: usize },

    /// A cell access fell outside `[0,rows) x [0,cols)`.
    #[error("coordinates ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
