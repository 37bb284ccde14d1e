//! Run configuration for the file-based simulation pipeline

use std::path::PathBuf;
use tone_diffusion::{DiffusionConfig, Schedule};

/// Environment variable that forces the kernel chunk size
pub const CHUNK_SIZE_ENV: &str = "OMP_CHUNK_SIZE";

/// Mixing coefficient used when none is given
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Everything needed to run one simulation from files to files
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub graph: PathBuf,
    pub states: PathBuf,
    pub out_states: PathBuf,
    pub history: PathBuf,
    /// Number of synchronous steps (T)
    pub steps: usize,
    pub alpha: f64,
    /// Worker count; 0 means the platform default
    pub threads: usize,
    pub chunk_size: Option<usize>,
    pub schedule: Option<Schedule>,
}

impl SimulationConfig {
    pub fn new(
        graph: impl Into<PathBuf>,
        states: impl Into<PathBuf>,
        out_states: impl Into<PathBuf>,
        history: impl Into<PathBuf>,
        steps: usize,
    ) -> Self {
        Self {
            graph: graph.into(),
            states: states.into(),
            out_states: out_states.into(),
            history: history.into(),
            steps,
            alpha: DEFAULT_ALPHA,
            threads: 0,
            chunk_size: None,
            schedule: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Force a chunk size; `None` or zero keeps the auto policy
    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size.filter(|&c| c > 0);
        self
    }

    pub fn with_schedule(mut self, schedule: Option<Schedule>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Engine-level view of this configuration
    pub fn diffusion_config(&self) -> DiffusionConfig {
        DiffusionConfig {
            steps: self.steps,
            alpha: self.alpha,
            threads: self.threads,
            chunk_size: self.chunk_size,
            schedule: self.schedule,
        }
    }
}

/// Parse a chunk size override. Only positive integers count.
pub fn parse_chunk_size(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&c| c > 0)
}

/// Chunk size forced through `OMP_CHUNK_SIZE`, if any
pub fn chunk_size_from_env() -> Option<usize> {
    std::env::var(CHUNK_SIZE_ENV)
        .ok()
        .and_then(|raw| parse_chunk_size(&raw))
}
