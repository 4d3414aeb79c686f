//! Game of Life transition rule

use super::Grid;
use rayon::prelude::*;

/// The standard B3/S23 rule applied over a whole grid.
pub struct LifeRules;

impl LifeRules {
    /// Compute the next generation. Every cell is decided from the previous
    /// generation's state only; the result is a fresh grid with the same
    /// dimensions, fill value and neighbor rule.
    pub fn evolve(current: &Grid) -> Grid {
        let next_cells: Vec<bool> = (0..current.height)
            .into_par_iter()
            .flat_map(|row| {
                (0..current.width).into_par_iter().map(move |col| {
                    let neighbors = current.live_neighbors(row, col);
                    let alive = current.cells[current.index(row, col)];
                    Self::next_state(alive, neighbors)
                })
            })
            .collect();

        Grid {
            width: current.width,
            height: current.height,
            cells: next_cells,
            initial: current.initial,
            neighbor_rule: current.neighbor_rule,
        }
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// Whether a cell is alive in the next generation given its current
    /// state and live-neighbor count.
    pub fn next_state(alive: bool, neighbors: u8) -> bool {
        matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
    }
}
