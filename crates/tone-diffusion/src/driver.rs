//! Diffusion driver
//!
//! Runs `T` fork-join steps over a worker pool bound for the whole run:
//! kernel into `next`, swap, record `sum / N`.

use crate::buffers::StateBuffers;
use crate::csr::InNeighbors;
use crate::error::{DiffusionError, DiffusionResult};
use crate::history::History;
use crate::kernel::step_partitioned;
use crate::schedule::{ChunkPolicy, Partition, Schedule};
use tracing::debug;

/// Diffusion configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionConfig {
    /// Number of synchronous steps
    pub steps: usize,
    /// Mixing coefficient in `[0, 1]`; 0 freezes state, 1 replaces it with the neighbor mean
    pub alpha: f64,
    /// Worker count; 0 means the platform default
    pub threads: usize,
    /// Forced chunk size (overrides the auto policy)
    pub chunk_size: Option<usize>,
    /// Forced schedule (overrides the auto policy)
    pub schedule: Option<Schedule>,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            steps: 0,
            alpha: 0.3,
            threads: 0,
            chunk_size: None,
            schedule: None,
        }
    }
}

/// Progress of a run, reported after each completed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Steps completed so far (1-based)
    pub step: usize,
    pub steps: usize,
    /// Global mean after this step
    pub mean: f64,
}

/// Receives a [`StepReport`] after every step
pub trait StepObserver {
    fn on_step(&mut self, report: &StepReport);
}

impl<F: FnMut(&StepReport)> StepObserver for F {
    fn on_step(&mut self, report: &StepReport) {
        self(report)
    }
}

/// Final states and per-step history of a run
#[derive(Debug, Clone)]
pub struct DiffusionOutcome {
    pub final_states: Vec<f64>,
    pub history: History,
    /// Worker count the run was bound to
    pub threads: usize,
    pub chunk_size: usize,
    pub schedule: Schedule,
}

/// Run the diffusion for `config.steps` steps.
///
/// Only the first `N` entries of `initial` are used.
pub fn run(
    view: &InNeighbors,
    initial: &[f64],
    config: &DiffusionConfig,
) -> DiffusionResult<DiffusionOutcome> {
    run_with_observer(view, initial, config, &mut |_: &StepReport| {})
}

/// Like [`run`], calling `observer` after every step.
pub fn run_with_observer<O: StepObserver>(
    view: &InNeighbors,
    initial: &[f64],
    config: &DiffusionConfig,
    observer: &mut O,
) -> DiffusionResult<DiffusionOutcome> {
    let n = view.node_count();
    if initial.len() < n {
        return Err(DiffusionError::ShapeMismatch {
            expected: n,
            actual: initial.len(),
        });
    }

    // The worker count stays fixed for the whole run
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let workers = pool.current_num_threads();

    let policy = ChunkPolicy::resolve(n, workers, config.chunk_size, config.schedule);
    let partition = Partition::new(n, workers, policy);
    debug!(
        "Partitioned {} nodes into {} chunks (size {}, {} schedule, {} workers)",
        n,
        partition.chunk_count(),
        partition.chunk_size(),
        partition.schedule(),
        workers
    );

    let mut buffers = StateBuffers::new(initial[..n].to_vec());
    let mut history = History::with_capacity(config.steps);

    for t in 0..config.steps {
        let (current, next) = buffers.split();
        let global_sum =
            pool.install(|| step_partitioned(current, next, view, config.alpha, &partition))?;
        buffers.swap();

        let mean = global_sum / n as f64;
        history.record(mean);
        observer.on_step(&StepReport {
            step: t + 1,
            steps: config.steps,
            mean,
        });
    }

    Ok(DiffusionOutcome {
        final_states: buffers.into_current(),
        history,
        threads: workers,
        chunk_size: partition.chunk_size(),
        schedule: partition.schedule(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(steps: usize, alpha: f64) -> DiffusionConfig {
        DiffusionConfig {
            steps,
            alpha,
            threads: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_steps_returns_initial() {
        let view = InNeighbors::build(2, &[(0, 1)]).unwrap();
        let outcome = run(&view, &[0.25, 0.75], &config(0, 0.5)).unwrap();

        assert_eq!(outcome.final_states, vec![0.25, 0.75]);
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.threads, 2);
    }

    #[test]
    fn test_extra_initial_states_are_ignored() {
        let view = InNeighbors::build(2, &[]).unwrap();
        let outcome = run(&view, &[1.0, 3.0, 100.0], &config(2, 0.5)).unwrap();

        assert_eq!(outcome.final_states, vec![1.0, 3.0]);
        assert_eq!(outcome.history.as_slice(), &[2.0, 2.0]);
    }

    #[test]
    fn test_short_initial_states_fail() {
        let view = InNeighbors::build(3, &[]).unwrap();
        let err = run(&view, &[1.0], &config(1, 0.5)).unwrap_err();

        assert!(matches!(err, DiffusionError::ShapeMismatch { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_observer_sees_every_step() {
        let view = InNeighbors::build(2, &[(0, 1), (1, 0)]).unwrap();
        let mut seen = Vec::new();
        let mut observer = |report: &StepReport| seen.push((report.step, report.steps, report.mean));

        let outcome = run_with_observer(&view, &[1.0, 0.0], &config(3, 0.5), &mut observer).unwrap();

        assert_eq!(seen, vec![(1, 3, 0.5), (2, 3, 0.5), (3, 3, 0.5)]);
        assert_eq!(outcome.history.len(), 3);
    }

    #[test]
    fn test_overrides_reach_partition() {
        let view = InNeighbors::build(10, &[]).unwrap();
        let cfg = DiffusionConfig {
            chunk_size: Some(3),
            schedule: Some(Schedule::Dynamic),
            ..config(1, 0.3)
        };
        let outcome = run(&view, &[0.0; 10], &cfg).unwrap();

        assert_eq!(outcome.chunk_size, 3);
        assert_eq!(outcome.schedule, Schedule::Dynamic);
    }
}
