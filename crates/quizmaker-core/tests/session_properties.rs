//! Session-level properties checked across many seeds.
//!
//! Each test drives full attempts through the public `Session` API with a
//! recording presenter, the way a front end would.

use std::collections::HashSet;

use quizmaker_core::presenter::{PresenterCall, RecordingPresenter};
use quizmaker_core::sampler::expected_choice_count;
use quizmaker_core::session::Phase;
use quizmaker_core::{AnswerPool, Question, Quiz, ResultTier, Session, SessionConfig};

fn quiz_with_answers(answers: &[&str]) -> (Quiz, AnswerPool) {
    let questions = answers
        .iter()
        .enumerate()
        .map(|(i, a)| Question::new(format!("img/{i}.jpg"), *a))
        .collect();
    let quiz = Quiz::new("Property quiz", questions).unwrap();
    let pool = quiz.answer_pool();
    (quiz, pool)
}

fn start(answers: &[&str], seed: u64) -> Session<RecordingPresenter> {
    let (quiz, pool) = quiz_with_answers(answers);
    Session::new(
        quiz,
        pool,
        SessionConfig::default().with_seed(seed),
        RecordingPresenter::new(),
    )
}

/// Answer every question, choosing correctly when `pick_correct` says so.
fn play_through(s: &mut Session<RecordingPresenter>, mut pick_correct: impl FnMut(usize) -> bool) {
    while !s.is_complete() {
        let i = s.current_index();
        let answer = s.current_question().unwrap().answer.clone();
        let choice = if pick_correct(i) {
            answer
        } else {
            // a single-entry pool offers nothing wrong to pick
            match s.current_choices().unwrap().iter().find(|c| **c != answer) {
                Some(wrong) => wrong.clone(),
                None => answer,
            }
        };
        let scheduled = s.select(&choice).expect("question should accept input");
        assert!(s.advance(scheduled.ticket));
    }
}

const TEN: [&str; 10] = [
    "cat", "dog", "cow", "owl", "fox", "bee", "ant", "elk", "yak", "emu",
];

#[test]
fn ten_distinct_answers_always_show_four_choices() {
    for seed in 0..50 {
        let mut s = start(&TEN, seed);
        while !s.is_complete() {
            let answer = s.current_question().unwrap().answer.clone();
            let choices = s.current_choices().unwrap().to_vec();
            assert_eq!(choices.len(), 4);
            assert_eq!(choices.iter().filter(|c| **c == answer).count(), 1);
            let t = s.select(&answer).unwrap();
            s.advance(t.ticket);
        }
    }
}

#[test]
fn choice_set_size_matches_pool() {
    let cases: [&[&str]; 4] = [
        &["cat"],
        &["cat", "dog"],
        &["cat", "dog", "cat", "cow"],
        &["a", "b", "c", "d", "e", "a"],
    ];
    for answers in cases {
        for seed in 0..20 {
            let mut s = start(answers, seed);
            while !s.is_complete() {
                let answer = s.current_question().unwrap().answer.clone();
                let choices = s.current_choices().unwrap();
                let unique: HashSet<_> = choices.iter().collect();
                assert_eq!(unique.len(), choices.len(), "duplicates in {choices:?}");
                assert_eq!(
                    choices.len(),
                    expected_choice_count(&answer, s.pool(), 3),
                    "{answers:?}"
                );
                let t = s.select(&answer).unwrap();
                s.advance(t.ticket);
            }
        }
    }
}

#[test]
fn completed_attempt_bounds_and_accuracy() {
    for seed in 0..40 {
        let mut s = start(&TEN[..7], seed);
        play_through(&mut s, |i| (i + seed as usize) % 3 != 0);
        let summary = s.summary().unwrap();
        assert!(summary.correct_count <= summary.total);
        assert_eq!(summary.total, 7);
        let expected = ((summary.correct_count * 100) as f64 / 7.0).round() as u32;
        assert_eq!(summary.accuracy_percent, expected);
    }
}

#[test]
fn all_correct_is_perfect_and_none_correct_is_lowest() {
    let mut s = start(&TEN, 1);
    play_through(&mut s, |_| true);
    assert_eq!(s.summary().unwrap().tier, ResultTier::Perfect);
    assert_eq!(s.summary().unwrap().accuracy_percent, 100);

    let mut s = start(&TEN, 2);
    play_through(&mut s, |_| false);
    assert_eq!(s.summary().unwrap().tier, ResultTier::KeepTrying);
    assert_eq!(s.summary().unwrap().correct_count, 0);
}

#[test]
fn cat_dog_example() {
    for seed in 0..20 {
        let mut s = start(&["cat", "dog"], seed);
        let mut dog_right = false;
        while !s.is_complete() {
            let mut choices = s.current_choices().unwrap().to_vec();
            choices.sort();
            assert_eq!(choices, vec!["cat", "dog"]);

            let answer = s.current_question().unwrap().answer.clone();
            let before = s.correct_count();
            // "dog" every time: right for the dog question, wrong for the cat one
            let t = s.select("dog").unwrap();
            if answer == "dog" {
                assert_eq!(s.correct_count(), before + 1);
                dog_right = true;
            } else {
                assert_eq!(s.correct_count(), before);
            }
            s.advance(t.ticket);
        }
        assert!(dog_right);
        assert_eq!(s.summary().unwrap().accuracy_percent, 50);
    }
}

#[test]
fn unknown_selections_never_consume_a_question() {
    for seed in 0..20 {
        let mut s = start(&["cat", "dog"], seed);
        while !s.is_complete() {
            let (count, index) = (s.correct_count(), s.current_index());
            for junk in ["horse", "", "Cat", " cat"] {
                assert!(s.select(junk).is_none());
            }
            assert!(s.accepting_input());
            assert_eq!((s.correct_count(), s.current_index()), (count, index));
            let t = s.select_choice(0).unwrap();
            s.advance(t.ticket);
        }
        assert_eq!(s.attempt().answers().len(), 2);
    }
}

#[test]
fn double_selection_never_changes_score_or_cursor() {
    for seed in 0..20 {
        let mut s = start(&TEN[..5], seed);
        while !s.is_complete() {
            let answer = s.current_question().unwrap().answer.clone();
            let t = s.select(&answer).unwrap();
            let (count, index) = (s.correct_count(), s.current_index());
            for choice in s.current_choices().unwrap().to_vec() {
                assert!(s.select(&choice).is_none());
            }
            assert_eq!((s.correct_count(), s.current_index()), (count, index));
            s.advance(t.ticket);
        }
    }
}

#[test]
fn restart_always_resets_regardless_of_history() {
    let mut s = start(&TEN[..4], 3);
    for attempt in 0..6 {
        match attempt % 3 {
            0 => play_through(&mut s, |_| true),
            1 => {
                let answer = s.current_question().unwrap().answer.clone();
                s.select(&answer);
            }
            _ => {}
        }
        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.correct_count(), 0);
        assert_eq!(s.total(), 4);
        assert!(s.accepting_input());
        assert!(matches!(s.phase(), Phase::Presenting { index: 0, .. }));
    }
}

#[test]
fn every_question_asked_once_per_attempt() {
    for seed in 0..20 {
        let mut s = start(&TEN, seed);
        let mut asked = Vec::new();
        while !s.is_complete() {
            asked.push(s.current_question().unwrap().media.clone());
            let t = s.select_choice(0).unwrap();
            s.advance(t.ticket);
        }
        let unique: HashSet<_> = asked.iter().collect();
        assert_eq!(unique.len(), 10);
        let mut order = s.attempt().order().to_vec();
        order.sort_unstable();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }
}

#[test]
fn restarts_reshuffle_the_order() {
    let mut s = start(&TEN, 4);
    let mut orders = HashSet::new();
    for _ in 0..10 {
        orders.insert(s.attempt().order().to_vec());
        s.restart();
    }
    assert!(orders.len() > 1, "ten attempts produced a single order");
}

#[test]
fn result_is_rendered_exactly_once_per_attempt() {
    let mut s = start(&TEN[..3], 5);
    play_through(&mut s, |_| true);
    s.restart();
    play_through(&mut s, |_| false);

    let results: Vec<_> = s
        .presenter()
        .calls()
        .iter()
        .filter(|c| matches!(c, PresenterCall::RenderResult { .. }))
        .collect();
    assert_eq!(results.len(), 2);
    assert_eq!(
        s.presenter().last_result(),
        Some((0, 3, 0, ResultTier::KeepTrying))
    );
}
