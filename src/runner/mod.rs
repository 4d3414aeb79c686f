//! Background stepping worker
//!
//! One dedicated thread advances the simulation at a fixed frame interval.
//! Cancellation is cooperative: the flag is checked at the top of every loop
//! iteration, so it takes effect between steps, never mid-step. Reaching a
//! stable state self-cancels the worker; period-2 oscillation does not.

use crate::engine::{Simulation, Stability, StepReport};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Sleep between consecutive steps; the worker's only blocking point.
    pub frame_duration: Duration,
    /// Optional generation cap in addition to convergence and cancellation.
    pub max_generations: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frame_duration: Duration::from_millis(300),
            max_generations: None,
        }
    }
}

/// Final state of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub generations: u64,
    pub stability: Option<Stability>,
}

/// Handle to a spawned stepping worker.
pub struct RunnerHandle {
    cancel: Arc<AtomicBool>,
    thread: JoinHandle<Result<RunOutcome>>,
}

impl RunnerHandle {
    /// Request cancellation; the worker stops before its next step.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether the worker has exited (by cancellation, convergence or cap).
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker to exit and collect the run outcome.
    pub fn join(self) -> Result<RunOutcome> {
        self.thread
            .join()
            .map_err(|_| anyhow!("stepping worker panicked"))?
    }
}

pub struct SimulationRunner;

impl SimulationRunner {
    /// Spawn the stepping worker.
    ///
    /// `on_step` runs after every step while the simulation lock is still
    /// held, so renderers observe a consistent per-generation snapshot.
    /// Manual edits go through the same `Arc<Mutex<Simulation>>` and are
    /// therefore applied before the next step reads cell state.
    pub fn spawn<F>(
        simulation: Arc<Mutex<Simulation>>,
        config: RunnerConfig,
        mut on_step: F,
    ) -> RunnerHandle
    where
        F: FnMut(&Simulation, &StepReport) + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&cancel);

        let thread = thread::spawn(move || -> Result<RunOutcome> {
            loop {
                if cancel_flag.load(Ordering::Relaxed) {
                    break;
                }

                let done = {
                    let mut sim = simulation
                        .lock()
                        .map_err(|_| anyhow!("simulation lock poisoned"))?;
                    let report = sim.step();
                    on_step(&*sim, &report);

                    let capped = config
                        .max_generations
                        .is_some_and(|cap| report.generation >= cap);
                    report.halt || capped
                };

                if done {
                    break;
                }

                thread::sleep(config.frame_duration);
            }

            let sim = simulation
                .lock()
                .map_err(|_| anyhow!("simulation lock poisoned"))?;
            Ok(RunOutcome {
                generations: sim.generation(),
                stability: sim.stability(),
            })
        });

        RunnerHandle { cancel, thread }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NeighborRule;
    use crate::engine::Grid;

    fn shared_sim(cells: Vec<Vec<bool>>) -> Arc<Mutex<Simulation>> {
        let grid = Grid::from_cells(cells, NeighborRule::Bounded).unwrap();
        Arc::new(Mutex::new(Simulation::new(grid)))
    }

    fn fast_config(max_generations: Option<u64>) -> RunnerConfig {
        RunnerConfig {
            frame_duration: Duration::from_millis(1),
            max_generations,
        }
    }

    #[test]
    fn test_stable_pattern_self_cancels() {
        let sim = shared_sim(vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ]);

        let handle = SimulationRunner::spawn(Arc::clone(&sim), fast_config(None), |_, _| {});
        let outcome = handle.join().unwrap();

        assert_eq!(outcome.generations, 1);
        assert_eq!(outcome.stability, Some(Stability::Stable(1)));
    }

    #[test]
    fn test_oscillator_runs_until_generation_cap() {
        let sim = shared_sim(vec![
            vec![false, false, false, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, false, false, false],
        ]);

        let handle = SimulationRunner::spawn(Arc::clone(&sim), fast_config(Some(10)), |_, _| {});
        let outcome = handle.join().unwrap();

        assert_eq!(outcome.generations, 10);
        assert_eq!(outcome.stability, Some(Stability::Oscillating(2)));
    }

    #[test]
    fn test_cancellation_stops_the_worker() {
        let sim = shared_sim(vec![
            vec![false, false, false, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, false, false, false],
        ]);

        let config = RunnerConfig {
            frame_duration: Duration::from_millis(5),
            max_generations: None,
        };
        let handle = SimulationRunner::spawn(Arc::clone(&sim), config, |_, _| {});

        thread::sleep(Duration::from_millis(25));
        handle.cancel();
        let outcome = handle.join().unwrap();

        assert!(outcome.generations >= 1);
        assert_eq!(outcome.stability, Some(Stability::Oscillating(2)));
    }

    #[test]
    fn test_on_step_sees_every_generation() {
        let sim = shared_sim(vec![
            vec![false, false, false, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, false, false, false],
        ]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handle = SimulationRunner::spawn(
            Arc::clone(&sim),
            fast_config(Some(4)),
            move |_, report| sink.lock().unwrap().push(report.generation),
        );
        handle.join().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_manual_edit_between_steps_restarts_detection() {
        let sim = shared_sim(vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ]);

        // Let the block stabilize, then edit: the next run re-detects.
        let handle = SimulationRunner::spawn(Arc::clone(&sim), fast_config(None), |_, _| {});
        handle.join().unwrap();

        sim.lock().unwrap().set(0, 0, true).unwrap();
        assert_eq!(sim.lock().unwrap().generation(), 0);
        assert_eq!(sim.lock().unwrap().stability(), None);

        let handle = SimulationRunner::spawn(Arc::clone(&sim), fast_config(Some(5)), |_, _| {});
        let outcome = handle.join().unwrap();
        assert!(outcome.stability.is_some());
    }
}
