//! Error types for the diffusion engine

use thiserror::Error;

/// Errors that can occur while building the graph view or running a diffusion
#[derive(Error, Debug)]
pub enum DiffusionError {
    /// The graph must contain at least one node
    #[error("Invalid node count: a graph needs at least one node")]
    InvalidNodeCount,

    /// A state vector does not match the node count of the graph
    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The worker pool for a run could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type DiffusionResult<T> = Result<T, DiffusionError>;
