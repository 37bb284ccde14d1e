use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tone_propagation::generate::{as_raw_edges, random_graph, random_states, GraphModel};
use tone_propagation::tone_diffusion::{run, DiffusionConfig, InNeighbors};

/// Benchmark CSR construction from a raw edge list
fn bench_csr_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr_build");

    for size in [1_000, 10_000, 100_000].iter() {
        let edges = as_raw_edges(&random_graph(GraphModel::Social, *size, 10, 42));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let view = InNeighbors::build(size, &edges).unwrap();
                criterion::black_box(view.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark ten diffusion steps across worker counts
fn bench_diffusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffusion_10_steps");
    let size = 100_000;
    let view = InNeighbors::build(size, &as_raw_edges(&random_graph(GraphModel::Social, size, 10, 42))).unwrap();
    let initial = random_states(size, 42);

    for threads in [1, 2, 4, 8].iter() {
        let config = DiffusionConfig {
            steps: 10,
            threads: *threads,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, _| {
            b.iter(|| {
                let outcome = run(&view, &initial, &config).unwrap();
                criterion::black_box(outcome.history.last());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_csr_build, bench_diffusion);
criterion_main!(benches);
