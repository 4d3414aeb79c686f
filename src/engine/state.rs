//! Simulation state: generation counting, convergence detection, observers

use super::error::EngineError;
use super::rules::LifeRules;
use super::Grid;
use serde::Serialize;
use std::mem;

/// Terminal condition detected for a run, recording the generation at which
/// it was first seen. First detection wins; only `clear` or a manual edit
/// resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "generation")]
pub enum Stability {
    /// The grid reproduced its immediate predecessor.
    Stable(u64),
    /// The grid reproduced the state two generations back (period-2
    /// oscillation). Detection only; stepping continues.
    Oscillating(u64),
}

/// A confirmed change to a single cell, delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub was: bool,
    pub now: bool,
}

/// Outcome of a single generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub stability: Option<Stability>,
    /// Asks the driving loop to stop stepping. Set once the grid is stable;
    /// oscillation does not halt.
    pub halt: bool,
}

type Observer = Box<dyn Fn(CellChange) + Send>;

/// Owns the current grid plus the bookkeeping around it: the previous
/// snapshot for oscillation detection, the generation counter, the stability
/// marker and the registered observers.
///
/// Exactly one writer mutates a `Simulation` at a time; the stepping worker
/// wraps it in `Arc<Mutex<..>>` so manual edits and steps serialize.
pub struct Simulation {
    grid: Grid,
    previous: Option<Grid>,
    generation: u64,
    stability: Option<Stability>,
    observers: Vec<Observer>,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            previous: None,
            generation: 0,
            stability: None,
            observers: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stability(&self) -> Option<Stability> {
        self.stability
    }

    /// Register an observer invoked synchronously after every confirmed cell
    /// change, from both manual edits and generation steps.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: Fn(CellChange) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, change: CellChange) {
        for observer in &self.observers {
            observer(change);
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.grid.get(row, col)
    }

    pub fn count_living_neighbors(&self, row: usize, col: usize) -> Result<u8, EngineError> {
        self.grid.count_living_neighbors(row, col)
    }

    /// Manual cell edit. Resets the generation counter and the stability
    /// marker, forcing convergence re-detection; observers hear about the
    /// cell only when its value actually changed.
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), EngineError> {
        let was = self.grid.set(row, col, value)?;
        self.generation = 0;
        self.stability = None;
        self.previous = None;
        if was != value {
            self.notify(CellChange {
                row,
                col,
                was,
                now: value,
            });
        }
        Ok(())
    }

    /// Reset every cell to the grid's initial fill value and restart the
    /// generation count. Idempotent.
    pub fn clear(&mut self) {
        let before = self.grid.cells.clone();
        self.grid.clear();
        self.previous = None;
        self.generation = 0;
        self.stability = None;

        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                let idx = self.grid.index(row, col);
                if before[idx] != self.grid.cells[idx] {
                    self.notify(CellChange {
                        row,
                        col,
                        was: before[idx],
                        now: self.grid.cells[idx],
                    });
                }
            }
        }
    }

    /// Advance one generation.
    ///
    /// The next grid is computed entirely from the current one, observers are
    /// told about every cell that flipped, and — while no marker is set yet —
    /// the new state is compared against the predecessor (stable) and the
    /// state two generations back (period-2 oscillation).
    pub fn step(&mut self) -> StepReport {
        let next = LifeRules::evolve(&self.grid);
        self.generation += 1;

        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                let idx = self.grid.index(row, col);
                if self.grid.cells[idx] != next.cells[idx] {
                    self.notify(CellChange {
                        row,
                        col,
                        was: self.grid.cells[idx],
                        now: next.cells[idx],
                    });
                }
            }
        }

        if self.stability.is_none() {
            if next.same_cells(&self.grid) {
                self.stability = Some(Stability::Stable(self.generation));
            } else if self.previous.as_ref().is_some_and(|p| next.same_cells(p)) {
                self.stability = Some(Stability::Oscillating(self.generation));
            }
        }

        self.previous = Some(mem::replace(&mut self.grid, next));

        StepReport {
            generation: self.generation,
            stability: self.stability,
            halt: matches!(self.stability, Some(Stability::Stable(_))),
        }
    }
}
