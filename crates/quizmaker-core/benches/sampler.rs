use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizmaker_core::sampler::sample_choices;
use quizmaker_core::AnswerPool;

fn pool_of(n: usize) -> AnswerPool {
    AnswerPool::new((0..n).map(|i| format!("answer-{i}")))
}

fn bench_sample_choices(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_choices");

    for size in [2, 10, 100, 1000] {
        let pool = pool_of(size);
        let mut rng = StdRng::seed_from_u64(0);
        group.bench_function(format!("pool={size}"), |b| {
            b.iter(|| sample_choices(black_box("answer-1"), black_box(&pool), 3, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sample_choices);
criterion_main!(benches);
