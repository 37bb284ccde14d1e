//! File-to-file simulation pipeline
//!
//! Read graph, build the in-neighbor view, read states, diffuse, then write
//! history and final states. Nothing is written unless the run succeeds.

use crate::config::SimulationConfig;
use crate::error::{FileRole, ToneError, ToneResult};
use crate::io::{read_graph, read_states, write_values};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tone_diffusion::{run_with_observer, InNeighbors, Schedule, StepObserver, StepReport};
use tracing::info;

/// Number of progress lines logged over a run
const PROGRESS_UPDATES: usize = 20;

/// Statistics of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub nodes: usize,
    pub edges: usize,
    pub dropped_edges: usize,
    pub steps: usize,
    pub alpha: f64,
    pub threads: usize,
    pub chunk_size: usize,
    pub schedule: Schedule,
    pub elapsed_secs: f64,
    pub steps_per_sec: f64,
    /// Last history entry, or the initial mean when no step ran
    pub final_mean: f64,
}

/// Logs step, percent, mean, elapsed time, ETA and rate about twenty times per run
pub struct ProgressLog {
    interval: usize,
    started: Instant,
}

impl ProgressLog {
    pub fn new(steps: usize) -> Self {
        Self {
            interval: (steps / PROGRESS_UPDATES).max(1),
            started: Instant::now(),
        }
    }

    fn due(&self, report: &StepReport) -> bool {
        (report.step - 1) % self.interval == 0 || report.step == report.steps
    }
}

impl StepObserver for ProgressLog {
    fn on_step(&mut self, report: &StepReport) {
        if !self.due(report) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = report.step as f64 / elapsed.max(f64::EPSILON);
        let eta = (report.steps - report.step) as f64 / rate;
        info!(
            "Step {}/{} ({:.1}%) | Avg sentiment: {:.6} | Elapsed: {:.1}s | ETA: {:.1}s | Rate: {:.0} steps/s",
            report.step,
            report.steps,
            100.0 * report.step as f64 / report.steps as f64,
            report.mean,
            elapsed,
            eta,
            rate
        );
    }
}

/// Run one simulation described by `config`
pub fn run_simulation(config: &SimulationConfig) -> ToneResult<RunSummary> {
    let graph = read_graph(&config.graph)?;
    // States are checked against N before any N-sized allocation
    let initial = read_states(&config.states, graph.node_count)?;

    let view = InNeighbors::build(graph.node_count, &graph.edges)?;
    drop(graph);
    let report = view.build_report();
    info!(
        "Built in-neighbor CSR: {} nodes, {} edges ({} dropped)",
        view.node_count(),
        view.edge_count(),
        report.dropped
    );

    let diffusion = config.diffusion_config();
    info!(
        "Starting simulation: {} steps, {} nodes, alpha={}, threads={}",
        config.steps,
        view.node_count(),
        config.alpha,
        if config.threads == 0 { "auto".to_string() } else { config.threads.to_string() }
    );
    let mut progress = ProgressLog::new(config.steps);
    let started = Instant::now();
    let outcome = run_with_observer(&view, &initial, &diffusion, &mut progress)?;
    let elapsed = started.elapsed().as_secs_f64();
    let steps_per_sec = config.steps as f64 / elapsed.max(f64::EPSILON);
    info!(
        "Completed {} steps in {:.2}s ({:.0} steps/s) on {} threads",
        config.steps, elapsed, steps_per_sec, outcome.threads
    );

    write_values(&config.history, outcome.history.as_slice(), FileRole::History)?;
    write_values(&config.out_states, &outcome.final_states, FileRole::FinalStates)?;

    let final_mean = outcome
        .history
        .last()
        .unwrap_or_else(|| initial.iter().sum::<f64>() / initial.len() as f64);

    Ok(RunSummary {
        nodes: view.node_count(),
        edges: view.edge_count(),
        dropped_edges: report.dropped,
        steps: config.steps,
        alpha: config.alpha,
        threads: outcome.threads,
        chunk_size: outcome.chunk_size,
        schedule: outcome.schedule,
        elapsed_secs: elapsed,
        steps_per_sec,
        final_mean,
    })
}

/// Write a run summary as pretty-printed JSON
pub fn write_summary(path: impl AsRef<Path>, summary: &RunSummary) -> ToneResult<()> {
    let path = path.as_ref();
    let wrap = |source| ToneError::Write {
        role: FileRole::Summary,
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush().map_err(wrap)
}
