//! Error types for the tone propagation pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tone_diffusion::DiffusionError;

/// Which file an I/O or parse failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Graph,
    States,
    History,
    FinalStates,
    Summary,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileRole::Graph => "graph",
            FileRole::States => "states",
            FileRole::History => "history",
            FileRole::FinalStates => "output states",
            FileRole::Summary => "summary",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur while loading inputs, running, or writing results
#[derive(Error, Debug)]
pub enum ToneError {
    /// Bad command-line usage
    #[error("Usage error: {0}")]
    Usage(String),

    /// An input file could not be opened or read
    #[error("Cannot open {role} file {}: {source}", path.display())]
    IoOpen {
        role: FileRole,
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file was readable but its content is unusable
    #[error("Invalid {role} file {}: {reason}", path.display())]
    Parse {
        role: FileRole,
        path: PathBuf,
        reason: String,
    },

    /// The states file holds fewer than N values
    #[error("States file had fewer than N entries ({found} < {expected})")]
    Shape { expected: usize, found: usize },

    /// An output file could not be written
    #[error("Cannot write {role} file {}: {source}", path.display())]
    Write {
        role: FileRole,
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Diffusion engine error
    #[error(transparent)]
    Diffusion(#[from] DiffusionError),
}

impl ToneError {
    /// Process exit code for this failure.
    ///
    /// 1 usage, 2 graph, 3 states unreadable, 4 states too short,
    /// 5 history unwritable, 6 final states unwritable.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToneError::Usage(_) => 1,
            ToneError::IoOpen { role, .. } | ToneError::Parse { role, .. } => match role {
                FileRole::Graph => 2,
                FileRole::States => 3,
                _ => 1,
            },
            ToneError::Shape { .. } => 4,
            ToneError::Write { role, .. } => match role {
                FileRole::History => 5,
                FileRole::FinalStates => 6,
                _ => 1,
            },
            ToneError::Serialization(_) => 1,
            ToneError::Diffusion(DiffusionError::InvalidNodeCount) => 2,
            ToneError::Diffusion(DiffusionError::ShapeMismatch { .. }) => 4,
            ToneError::Diffusion(DiffusionError::ThreadPool(_)) => 1,
        }
    }
}

pub type ToneResult<T> = Result<T, ToneError>;
