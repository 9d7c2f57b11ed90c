use criterion::{criterion_group, criterion_main, Criterion};
use mixforge::optimizer::anneal::{AnnealingOptimizer, AnnealingOptions};
use mixforge::optimizer::progress::SilentProgress;
use mixforge::optimizer::{Assigner, FixedPoolCount, GreedyAssigner};
use mixforge::partition::Partition;
use mixforge::scorer::{OverlapCounter, OverlapScorer};
use mixforge::synthetic;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let comps = synthetic::generate_compounds(Some(42), 96, 12, 0.5, 10.0);
    let scorer = OverlapScorer::default();
    let counter = OverlapCounter::new(0.02, 1.0);
    let (partition, _) = Partition::contiguous(&comps, 8).unwrap();
    let pool = partition.pool(0).to_vec();

    c.bench_function("bucketed_score_in (12 members)", |b| {
        b.iter(|| scorer.bucketed_score_in(black_box(&comps), black_box(pool[0]), black_box(&pool)))
    });

    c.bench_function("total_score (96 compounds, 8 pools)", |b| {
        b.iter(|| counter.total_score(black_box(&comps), black_box(&partition)))
    });

    c.bench_function("greedy pool-count (96 compounds)", |b| {
        let greedy = GreedyAssigner::new(&comps, &scorer);
        b.iter(|| {
            FixedPoolCount { pool_count: 8 }
                .assign(black_box(&greedy), &SilentProgress)
                .unwrap()
        })
    });

    let annealer = AnnealingOptimizer::new(&comps, counter, AnnealingOptions::default());
    c.bench_function("anneal 1000 steps", |b| {
        b.iter(|| {
            let mut rng = fastrand::Rng::with_seed(1);
            annealer.anneal(black_box(&partition), 1, &mut rng, &SilentProgress)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
