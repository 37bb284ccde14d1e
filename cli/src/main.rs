//! parallel_update — run a tone propagation simulation from files
//!
//! `parallel_update graph states out_states history T [alpha] [threads]`
//!
//! Exit codes: 0 success, 1 usage, 2 graph unreadable or invalid N,
//! 3 states unreadable, 4 states shorter than N, 5 history unwritable,
//! 6 output states unwritable.

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tone_propagation::tone_diffusion::Schedule;
use tone_propagation::{chunk_size_from_env, run_simulation, write_summary, SimulationConfig, ToneError};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "parallel_update",
    version,
    about = "Synchronous tone diffusion over a directed graph",
    allow_negative_numbers = true
)]
struct Cli {
    /// Graph file: `N M` header, then one `u v` edge per line
    graph: PathBuf,

    /// Initial states: one real number per line, at least N entries
    states: PathBuf,

    /// Where to write the N final states
    out_states: PathBuf,

    /// Where to write the T per-step mean values
    history: PathBuf,

    /// Number of synchronous steps
    steps: usize,

    /// Mixing coefficient, normally in [0, 1]; other values are used as given
    #[arg(default_value_t = tone_propagation::DEFAULT_ALPHA)]
    alpha: f64,

    /// Worker threads (0 = platform default)
    #[arg(default_value_t = 0)]
    threads: usize,

    /// Force the kernel chunk size (falls back to OMP_CHUNK_SIZE)
    #[arg(long)]
    chunk_size: Option<NonZeroUsize>,

    /// Chunk schedule
    #[arg(long, value_enum, default_value = "auto")]
    schedule: ScheduleArg,

    /// Write a JSON run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ScheduleArg {
    Auto,
    Static,
    Dynamic,
    Guided,
}

impl ScheduleArg {
    fn schedule(self) -> Option<Schedule> {
        match self {
            ScheduleArg::Auto => None,
            ScheduleArg::Static => Some(Schedule::Static),
            ScheduleArg::Dynamic => Some(Schedule::Dynamic),
            ScheduleArg::Guided => Some(Schedule::Guided),
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::WARN,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(cli: &Cli) -> Result<(), ToneError> {
    let config = SimulationConfig::new(
        &cli.graph,
        &cli.states,
        &cli.out_states,
        &cli.history,
        cli.steps,
    )
    .with_alpha(cli.alpha)
    .with_threads(cli.threads)
    .with_chunk_size(cli.chunk_size.map(NonZeroUsize::get).or_else(chunk_size_from_env))
    .with_schedule(cli.schedule.schedule());

    let summary = run_simulation(&config)?;
    if let Some(path) = &cli.summary {
        write_summary(path, &summary)?;
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(ToneError::Usage(e.to_string()).exit_code());
            }
        },
    };
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
