//! Synthetic social graphs and initial tones for benchmarking
//!
//! Every model produces an undirected simple graph and emits each pair in
//! both directions so influence is mutual. The same seed always yields the
//! same edge list.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Random graph model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphModel {
    /// Uniform random pairs, `G(n, m)` with `m = n * avg_degree / 2`
    ErdosRenyi,
    /// Preferential attachment: each new node links to `avg_degree / 2` existing nodes
    BarabasiAlbert,
    /// Ring lattice with `avg_degree` neighbors, each edge rewired with probability 0.1
    WattsStrogatz,
    /// Preferential attachment hubs plus a sparse uniform layer
    #[default]
    Social,
}

impl fmt::Display for GraphModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphModel::ErdosRenyi => "erdos",
            GraphModel::BarabasiAlbert => "barabasi",
            GraphModel::WattsStrogatz => "watts",
            GraphModel::Social => "social",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GraphModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "erdos" => Ok(GraphModel::ErdosRenyi),
            "barabasi" => Ok(GraphModel::BarabasiAlbert),
            "watts" => Ok(GraphModel::WattsStrogatz),
            "social" => Ok(GraphModel::Social),
            other => Err(format!("unknown graph model '{}'", other)),
        }
    }
}

/// Rewiring probability of the small-world model
const REWIRE_PROBABILITY: f64 = 0.1;

/// Undirected pairs in insertion order, without duplicates or self-loops
#[derive(Default)]
struct PairSet {
    seen: HashSet<(usize, usize)>,
    pairs: Vec<(usize, usize)>,
}

impl PairSet {
    fn key(u: usize, v: usize) -> (usize, usize) {
        (u.min(v), u.max(v))
    }

    fn contains(&self, u: usize, v: usize) -> bool {
        self.seen.contains(&Self::key(u, v))
    }

    fn insert(&mut self, u: usize, v: usize) -> bool {
        if u == v || !self.seen.insert(Self::key(u, v)) {
            return false;
        }
        self.pairs.push((u, v));
        true
    }

    fn into_directed(self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(2 * self.pairs.len());
        for (u, v) in self.pairs {
            edges.push((u, v));
            edges.push((v, u));
        }
        edges
    }
}

fn erdos_renyi(pairs: &mut PairSet, n: usize, target: usize, rng: &mut StdRng) {
    // Dense requests stop at the complete graph
    let target = target.min(n * (n - 1) / 2 - pairs.pairs.len());
    let mut added = 0;
    while added < target {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if pairs.insert(u, v) {
            added += 1;
        }
    }
}

fn barabasi_albert(pairs: &mut PairSet, n: usize, m: usize, rng: &mut StdRng) {
    let m = m.clamp(1, n - 1);
    // One entry per edge endpoint, so sampling is proportional to degree
    let mut endpoints: Vec<usize> = Vec::with_capacity(2 * n * m);
    let mut targets: Vec<usize> = (0..m).collect();

    for source in m..n {
        for &target in &targets {
            pairs.insert(source, target);
        }
        endpoints.extend(&targets);
        endpoints.extend(std::iter::repeat(source).take(m));

        let mut chosen = HashSet::with_capacity(m);
        while chosen.len() < m {
            chosen.insert(endpoints[rng.gen_range(0..endpoints.len())]);
        }
        targets = chosen.into_iter().collect();
        targets.sort_unstable();
    }
}

fn watts_strogatz(pairs: &mut PairSet, n: usize, k: usize, p: f64, rng: &mut StdRng) {
    let half = (k / 2).min((n - 1) / 2);
    for j in 1..=half {
        for u in 0..n {
            pairs.insert(u, (u + j) % n);
        }
    }

    let mut degree = vec![2 * half; n];
    let lattice = std::mem::take(&mut pairs.pairs);
    let mut rewired = Vec::with_capacity(lattice.len());
    for (u, v) in lattice {
        // `u` keeps its end; only nodes with a free slot can be rewired
        if degree[u] < n - 1 && rng.gen_bool(p) {
            let mut w = rng.gen_range(0..n);
            while w == u || pairs.contains(u, w) {
                w = rng.gen_range(0..n);
            }
            pairs.seen.remove(&PairSet::key(u, v));
            pairs.seen.insert(PairSet::key(u, w));
            degree[v] -= 1;
            degree[w] += 1;
            rewired.push((u, w));
        } else {
            rewired.push((u, v));
        }
    }
    pairs.pairs = rewired;
}

/// Random graph with about `avg_degree` neighbors per node
pub fn random_graph(
    model: GraphModel,
    n: usize,
    avg_degree: usize,
    seed: u64,
) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = PairSet::default();

    match model {
        GraphModel::ErdosRenyi => erdos_renyi(&mut pairs, n, n * avg_degree / 2, &mut rng),
        GraphModel::BarabasiAlbert => barabasi_albert(&mut pairs, n, avg_degree / 2, &mut rng),
        GraphModel::WattsStrogatz => {
            watts_strogatz(&mut pairs, n, avg_degree, REWIRE_PROBABILITY, &mut rng)
        }
        GraphModel::Social => {
            barabasi_albert(&mut pairs, n, avg_degree / 2, &mut rng);
            erdos_renyi(&mut pairs, n, n * avg_degree / 4, &mut rng);
        }
    }
    pairs.into_directed()
}

/// Initial tones drawn from `N(0, 0.5)` and clipped to `[-1, 1]`
pub fn random_states(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            (0.5 * z).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Convert generated edges to the raw form the CSR builder takes
pub fn as_raw_edges(edges: &[(usize, usize)]) -> Vec<(i64, i64)> {
    edges.iter().map(|&(u, v)| (u as i64, v as i64)).collect()
}
