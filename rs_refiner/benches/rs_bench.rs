use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rs_refiner::resistance::rs;
use rs_refiner::{find_targets, GraphState, RegoConfig, RewireOptimizer, TargetingConfig};

/// Ring lattice: each node linked to its `k` nearest neighbours on either side.
fn ring_lattice(n: usize, k: usize) -> GraphState {
    let mut graph = GraphState::new(n);
    for u in 0..n {
        for step in 1..=k {
            graph.add_edge(u, (u + step) % n);
        }
    }
    graph
}

fn bench_rs(c: &mut Criterion) {
    let mut group = c.benchmark_group("rs");
    for n in [25, 50, 100] {
        let graph = ring_lattice(n, 2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| rs(black_box(g)).unwrap())
        });
    }
    group.finish();
}

fn bench_searches(c: &mut Criterion) {
    let graph = ring_lattice(30, 2);

    c.bench_function("greedy_3_targets_n30", |b| {
        let config = TargetingConfig {
            num_targets: 3,
            ..TargetingConfig::default()
        };
        b.iter(|| find_targets(black_box(&graph), &config).unwrap())
    });

    c.bench_function("rego_100_iters_n30", |b| {
        let optimizer = RewireOptimizer::new(RegoConfig {
            iterations: 100,
            ..RegoConfig::default()
        });
        b.iter(|| optimizer.optimize_seeded(black_box(&graph), 42).unwrap())
    });
}

criterion_group!(benches, bench_rs, bench_searches);
criterion_main!(benches);
