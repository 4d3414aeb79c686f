//! Terminal rendering for grids and run results

use crate::engine::{Grid, Stability};
use crate::runner::RunOutcome;
use itertools::Itertools;

/// Formatting helpers for showing grids on a terminal.
pub struct GridRenderer;

impl GridRenderer {
    /// Render a grid with filled/empty squares.
    pub fn format_grid(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.height {
            for col in 0..grid.width {
                output.push_str(if grid.cells[grid.index(row, col)] {
                    "⬛"
                } else {
                    "⬜"
                });
            }
            output.push('\n');
        }
        output
    }

    /// Compact single-character rendering, handy for logs and diffs.
    pub fn format_grid_compact(grid: &Grid) -> String {
        (0..grid.height)
            .map(|row| {
                (0..grid.width)
                    .map(|col| {
                        if grid.cells[grid.index(row, col)] {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }

    /// Render with column headers and row numbers.
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let header = (0..grid.width).map(|col| format!("{:2}", col % 100)).join("");
        let mut output = format!("   {}\n", header);

        for row in 0..grid.height {
            output.push_str(&format!("{:2} ", row % 100));
            for col in 0..grid.width {
                output.push_str(if grid.cells[grid.index(row, col)] {
                    " #"
                } else {
                    " ."
                });
            }
            output.push('\n');
        }
        output
    }

    /// One-line human summary of a finished run.
    pub fn format_outcome(outcome: &RunOutcome) -> String {
        match outcome.stability {
            Some(Stability::Stable(generation)) => format!(
                "Stabilized at generation {} (ran {} generation(s))",
                generation, outcome.generations
            ),
            Some(Stability::Oscillating(generation)) => format!(
                "Period-2 oscillation detected at generation {} (ran {} generation(s))",
                generation, outcome.generations
            ),
            None => format!(
                "No convergence after {} generation(s)",
                outcome.generations
            ),
        }
    }
}

/// ANSI color helpers for CLI status output.
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
