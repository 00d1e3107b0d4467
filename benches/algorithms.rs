use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graph_toolkit::{
    ConflictScheduler, CriticalConnectionAnalyzer, EdmondsKarp, FlowNetwork, Graph,
    GraphDescription, Johnson,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(n: usize, m: usize, weights: std::ops::Range<i64>) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    let edges: Vec<(i64, i64, i64)> = (0..m)
        .map(|_| {
            (
                rng.gen_range(0..n) as i64,
                rng.gen_range(0..n) as i64,
                rng.gen_range(weights.clone()),
            )
        })
        .collect();
    Graph::from_description(&GraphDescription::from_weighted_edges(n, &edges)).unwrap()
}

fn bench_algorithms(c: &mut Criterion) {
    let graph = random_graph(200, 800, 0..100);

    c.bench_function("critical_connections_200", |b| {
        b.iter(|| CriticalConnectionAnalyzer::new(black_box(&graph)).analyze().unwrap())
    });

    c.bench_function("johnson_200", |b| {
        b.iter(|| Johnson::new(black_box(&graph)).all_pairs().unwrap())
    });

    let network = FlowNetwork::from_graph(&graph).unwrap();
    let algo = EdmondsKarp::new(network);
    c.bench_function("edmonds_karp_200", |b| {
        b.iter(|| algo.max_flow(black_box(0), black_box(199)).unwrap())
    });

    c.bench_function("schedule_200", |b| {
        b.iter(|| ConflictScheduler::new(black_box(&graph)).schedule())
    });
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
