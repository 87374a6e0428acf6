//! Distractor sampling.
//!
//! Builds the answer choices shown for one question: the correct answer plus
//! up to `max_distractors` other answers from the pool, in random order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::AnswerPool;

/// Default number of distractors shown next to the correct answer.
pub const DEFAULT_MAX_DISTRACTORS: usize = 3;

/// Sample the display set for a question.
///
/// The correct answer is excluded from the candidate distractors even when
/// the pool contains it. The result holds the correct answer exactly once and
/// `min(max_distractors, |pool \ {correct}|)` distinct distractors; a small
/// pool yields a short set rather than padding.
pub fn sample_choices<R>(
    correct: &str,
    pool: &AnswerPool,
    max_distractors: usize,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut candidates: Vec<&str> = pool.iter().filter(|a| *a != correct).collect();
    candidates.shuffle(rng);
    candidates.truncate(max_distractors);

    let mut choices: Vec<String> = candidates.into_iter().map(str::to_owned).collect();
    choices.push(correct.to_owned());
    choices.shuffle(rng);
    choices
}

/// Size of the set `sample_choices` will return for `correct`.
pub fn expected_choice_count(correct: &str, pool: &AnswerPool, max_distractors: usize) -> usize {
    1 + pool.distractor_count(correct).min(max_distractors)
}
