//! Pattern file I/O
//!
//! Format: one line per row, '1' for alive cells and '0' for dead cells.

use super::Grid;
use crate::config::NeighborRule;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern from a text file
pub fn load_pattern<P: AsRef<Path>>(path: P, neighbor_rule: NeighborRule) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content, neighbor_rule)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a pattern from its string representation
pub fn parse_pattern(content: &str, neighbor_rule: NeighborRule) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        cells.push(row);
    }

    Grid::from_cells(cells, neighbor_rule)
}

/// Save a pattern to a text file
pub fn save_pattern<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = pattern_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to the pattern string representation
pub fn pattern_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height * (grid.width + 1));

    for row in 0..grid.height {
        for col in 0..grid.width {
            result.push(if grid.cells[grid.index(row, col)] {
                '1'
            } else {
                '0'
            });
        }
        result.push('\n');
    }

    result
}

/// Create example pattern files for experimenting with the simulation
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "110000\n110000\n001100\n001100\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
