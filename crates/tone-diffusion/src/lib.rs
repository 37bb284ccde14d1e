//! Tone Diffusion
//!
//! A synchronous, discrete-time diffusion engine over directed graphs. Every
//! step replaces each node's state with a convex combination of its own prior
//! state and the mean of its in-neighbors' prior states, and records the
//! global mean.
//!
//! ```rust
//! use tone_diffusion::{run, DiffusionConfig, InNeighbors};
//!
//! let view = InNeighbors::build(2, &[(0, 1), (1, 0)]).unwrap();
//! let config = DiffusionConfig { steps: 2, alpha: 0.5, threads: 1, ..Default::default() };
//! let outcome = run(&view, &[1.0, 0.0], &config).unwrap();
//!
//! assert_eq!(outcome.final_states, vec![0.5, 0.5]);
//! assert_eq!(outcome.history.as_slice(), &[0.5, 0.5]);
//! ```

pub mod buffers;
pub mod csr;
pub mod driver;
pub mod error;
pub mod history;
pub mod kernel;
pub mod schedule;

pub use buffers::StateBuffers;
pub use csr::{BuildReport, InNeighbors, NodeId};
pub use driver::{run, run_with_observer, DiffusionConfig, DiffusionOutcome, StepObserver, StepReport};
pub use error::{DiffusionError, DiffusionResult};
pub use history::History;
pub use kernel::{step, step_partitioned};
pub use schedule::{ChunkPolicy, Partition, Schedule};
