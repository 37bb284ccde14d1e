//! Tone Propagation
//!
//! Simulates how emotional tone spreads through a social graph. Every step,
//! each user's tone moves towards the mean tone of the users who influence
//! them; the run records the population-wide mean after each step.
//!
//! The diffusion engine lives in the `tone-diffusion` crate. This crate adds
//! the text formats, the file-to-file pipeline with progress logging, and
//! synthetic input generation.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tone_propagation::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new("graph.txt", "states.txt", "final.txt", "history.txt", 100)
//!     .with_alpha(0.25)
//!     .with_threads(4);
//! let summary = run_simulation(&config).unwrap();
//! println!("final mean: {}", summary.final_mean);
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod io;
pub mod simulation;

pub use tone_diffusion;

pub use config::{chunk_size_from_env, parse_chunk_size, SimulationConfig, CHUNK_SIZE_ENV, DEFAULT_ALPHA};
pub use error::{FileRole, ToneError, ToneResult};
pub use io::{read_graph, read_states, write_graph, write_values, GraphFile};
pub use simulation::{run_simulation, write_summary, ProgressLog, RunSummary};

/// Get the version of Tone Propagation
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
