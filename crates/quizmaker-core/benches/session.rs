use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmaker_core::presenter::NoopPresenter;
use quizmaker_core::{Question, Quiz, Session, SessionConfig};

fn make_quiz(n: usize) -> Quiz {
    let questions = (0..n)
        .map(|i| Question::new(format!("img/{i}.jpg"), format!("answer-{i}")))
        .collect();
    Quiz::new("bench", questions).unwrap()
}

fn bench_full_attempt(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_attempt");

    for size in [10, 100] {
        let quiz = make_quiz(size);
        let pool = quiz.answer_pool();
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| {
                let mut session = Session::new(
                    quiz.clone(),
                    pool.clone(),
                    SessionConfig::default().with_seed(7),
                    NoopPresenter,
                );
                while !session.is_complete() {
                    let scheduled = session.select_choice(0).unwrap();
                    session.advance(scheduled.ticket);
                }
                black_box(session.summary())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_attempt);
criterion_main!(benches);
