//! Grid representation and neighbor counting

use super::error::EngineError;
use crate::config::NeighborRule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bounded, non-toroidal Game of Life grid.
///
/// Dimensions are fixed at construction. Cells are stored row-major as a flat
/// boolean vector; `initial` records the fill value that `clear` restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
    pub initial: bool,
    pub neighbor_rule: NeighborRule,
}

impl Grid {
    /// Create a new grid with every cell set to `initial`.
    pub fn new(
        width: usize,
        height: usize,
        initial: bool,
        neighbor_rule: NeighborRule,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimension {
                cols: width,
                rows: height,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![initial; width * height],
            initial,
            neighbor_rule,
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(
        cells: Vec<Vec<bool>>,
        neighbor_rule: NeighborRule,
    ) -> anyhow::Result<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimension {
                cols: width,
                rows: height,
            }
            .into());
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        let flat_cells: Vec<bool> = cells.into_iter().flatten().collect();

        Ok(Self {
            width,
            height,
            cells: flat_cells,
            initial: false,
            neighbor_rule,
        })
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), EngineError> {
        if row >= self.height || col >= self.width {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.height,
                cols: self.width,
            });
        }
        Ok(())
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Set cell value at coordinates, returning the previous value.
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<bool, EngineError> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        let was = self.cells[idx];
        self.cells[idx] = value;
        Ok(was)
    }

    /// Reset every cell to the configured initial value.
    pub fn clear(&mut self) {
        self.cells.fill(self.initial);
    }

    /// Count living cells among the up-to-8 Moore neighbors inside the grid.
    pub fn count_living_neighbors(&self, row: usize, col: usize) -> Result<u8, EngineError> {
        self.check_bounds(row, col)?;
        Ok(self.live_neighbors(row, col))
    }

    /// Unchecked neighbor count, for the transition loop where coordinates
    /// are known to be in bounds.
    pub(crate) fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        match self.neighbor_rule {
            NeighborRule::Bounded => self.live_neighbors_bounded(row, col),
            NeighborRule::Legacy => self.live_neighbors_legacy(row, col),
        }
    }

    fn live_neighbors_bounded(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = row as isize + dr;
                let c = col as isize + dc;

                if r >= 0
                    && r < self.height as isize
                    && c >= 0
                    && c < self.width as isize
                    && self.cells[self.index(r as usize, c as usize)]
                {
                    count += 1;
                }
            }
        }

        count
    }

    /// Historical counting, guards preserved verbatim: the whole upper band
    /// needs `row - 1 > 0` and the left column needs `col - 1 > 0`, so
    /// index-0 neighbors of row/column 1 are never seen. Upper bounds use
    /// the correct `< len` tests.
    fn live_neighbors_legacy(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        let alive = |r: usize, c: usize| u8::from(self.cells[self.index(r, c)]);

        if row > 1 {
            if col > 1 {
                count += alive(row - 1, col - 1);
            }
            count += alive(row - 1, col);
            if col + 1 < self.width {
                count += alive(row - 1, col + 1);
            }
        }
        if col + 1 < self.width {
            count += alive(row, col + 1);
        }
        if col > 1 {
            count += alive(row, col - 1);
        }
        if row + 1 < self.height {
            count += alive(row + 1, col);
            if col + 1 < self.width {
                count += alive(row + 1, col + 1);
            }
            if col > 1 {
                count += alive(row + 1, col - 1);
            }
        }

        count
    }

    /// Cell-wise equality; grids of different dimensions are simply not
    /// equal, never an error.
    pub fn same_cells(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        let mut living = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.cells[self.index(row, col)] {
                    living.push((row, col));
                }
            }
        }
        living
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.cells[self.index(row, col)] {
                    "⬛"
                } else {
                    "⬜"
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4, false, NeighborRule::Bounded).unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 4);
        assert_eq!(grid.cells.len(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 3, false, NeighborRule::Bounded),
            Err(EngineError::InvalidDimension { cols: 0, rows: 3 })
        );
        assert_eq!(
            Grid::new(3, 0, false, NeighborRule::Bounded),
            Err(EngineError::InvalidDimension { cols: 3, rows: 0 })
        );
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut grid = Grid::new(4, 4, false, NeighborRule::Bounded).unwrap();
        let was = grid.set(2, 3, true).unwrap();
        assert!(!was);
        assert!(grid.get(2, 3).unwrap());

        // No other cell disturbed.
        for (row, col) in (0..4).flat_map(|r| (0..4).map(move |c| (r, c))) {
            if (row, col) != (2, 3) {
                assert!(!grid.get(row, col).unwrap());
            }
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(3, 3, false, NeighborRule::Bounded).unwrap();
        assert_eq!(
            grid.get(3, 0),
            Err(EngineError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 3
            })
        );
        assert!(grid.set(0, 3, true).is_err());
        assert!(grid.count_living_neighbors(5, 5).is_err());
    }

    #[test]
    fn test_neighbor_counting_interior() {
        let cells = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_cells(cells, NeighborRule::Bounded).unwrap();

        assert_eq!(grid.count_living_neighbors(1, 1).unwrap(), 8);
        // Corner sees only its three in-bounds neighbors, of which two live.
        assert_eq!(grid.count_living_neighbors(0, 0).unwrap(), 2);
    }

    #[test]
    fn test_single_cell_has_no_neighbors() {
        let mut grid = Grid::new(5, 5, false, NeighborRule::Bounded).unwrap();
        grid.set(2, 2, true).unwrap();
        assert_eq!(grid.count_living_neighbors(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_legacy_rule_skips_index_zero_neighbors() {
        // A live cell at (0,0) is a neighbor of (1,1) under the corrected
        // rule but invisible under the historical one.
        let mut bounded = Grid::new(4, 4, false, NeighborRule::Bounded).unwrap();
        bounded.set(0, 0, true).unwrap();
        assert_eq!(bounded.count_living_neighbors(1, 1).unwrap(), 1);

        let mut legacy = Grid::new(4, 4, false, NeighborRule::Legacy).unwrap();
        legacy.set(0, 0, true).unwrap();
        assert_eq!(legacy.count_living_neighbors(1, 1).unwrap(), 0);
    }

    #[test]
    fn test_legacy_rule_skips_whole_upper_band_for_row_one() {
        // Row 0 entirely live: row 1 sees none of it, row 2 sees all of it.
        let mut grid = Grid::new(3, 3, false, NeighborRule::Legacy).unwrap();
        for col in 0..3 {
            grid.set(0, col, true).unwrap();
        }
        assert_eq!(grid.count_living_neighbors(1, 2).unwrap(), 0);
        assert_eq!(grid.count_living_neighbors(2, 2).unwrap(), 0);

        // Away from the low-index edges the two rules agree.
        let mut grid = Grid::new(5, 5, false, NeighborRule::Legacy).unwrap();
        grid.set(2, 2, true).unwrap();
        assert_eq!(grid.count_living_neighbors(3, 3).unwrap(), 1);
    }

    #[test]
    fn test_dimension_mismatch_not_equal() {
        let a = Grid::new(3, 3, false, NeighborRule::Bounded).unwrap();
        let b = Grid::new(3, 4, false, NeighborRule::Bounded).unwrap();
        assert!(!a.same_cells(&b));
        assert!(!b.same_cells(&a));
    }

    #[test]
    fn test_clear_restores_initial_value() {
        let mut grid = Grid::new(3, 3, true, NeighborRule::Bounded).unwrap();
        grid.set(1, 1, false).unwrap();
        grid.clear();
        assert_eq!(grid.living_count(), 9);
    }

    #[test]
    fn test_from_cells_rejects_ragged_rows() {
        let cells = vec![vec![true, false], vec![true]];
        assert!(Grid::from_cells(cells, NeighborRule::Bounded).is_err());
        assert!(Grid::from_cells(vec![], NeighborRule::Bounded).is_err());
    }

    #[test]
    fn test_living_cells() {
        let cells = vec![vec![false, true], vec![true, false]];
        let grid = Grid::from_cells(cells, NeighborRule::Bounded).unwrap();
        assert_eq!(grid.living_cells(), vec![(0, 1), (1, 0)]);
        assert_eq!(grid.living_count(), 2);
    }
}
