//! tone-gen — write a synthetic graph and initial states for parallel_update

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tone_propagation::generate::{random_graph, random_states, GraphModel};
use tone_propagation::{write_graph, write_values, FileRole};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Erdos,
    Barabasi,
    Watts,
    Social,
}

impl From<ModelArg> for GraphModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Erdos => GraphModel::ErdosRenyi,
            ModelArg::Barabasi => GraphModel::BarabasiAlbert,
            ModelArg::Watts => GraphModel::WattsStrogatz,
            ModelArg::Social => GraphModel::Social,
        }
    }
}

#[derive(Parser)]
#[command(name = "tone-gen", version, about = "Generate a random social graph and initial tones")]
struct Cli {
    /// Number of nodes
    #[arg(long, default_value_t = 10_000)]
    nodes: usize,

    /// Average number of neighbors per node
    #[arg(long, default_value_t = 10)]
    avg_degree: usize,

    /// Graph model
    #[arg(long, value_enum, default_value_t = ModelArg::Social)]
    model: ModelArg,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output graph file
    #[arg(long, default_value = "data/graph.txt")]
    graph_out: PathBuf,

    /// Output states file
    #[arg(long, default_value = "data/states.txt")]
    states_out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    ensure!(cli.nodes > 0, "--nodes must be positive");

    for path in [&cli.graph_out, &cli.states_out] {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
    }

    let model = GraphModel::from(cli.model);
    let edges = random_graph(model, cli.nodes, cli.avg_degree, cli.seed);
    write_graph(&cli.graph_out, cli.nodes, &edges)?;
    info!(
        "Generated {} graph: {} nodes, {} edges -> {}",
        model,
        cli.nodes,
        edges.len(),
        cli.graph_out.display()
    );

    let states = random_states(cli.nodes, cli.seed);
    write_values(&cli.states_out, &states, FileRole::States)?;
    info!("Generated initial states -> {}", cli.states_out.display());

    Ok(())
}
