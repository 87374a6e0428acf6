//! Quiz and presentation error types.
//!
//! `QuizError` is fatal: a quiz that fails these checks never reaches the
//! session engine. `PlaybackError` is cosmetic and is swallowed by the engine.

use thiserror::Error;

/// Reasons a quiz record cannot be turned into a playable quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The quiz has no title, or the title is blank.
    #[error("quiz title is missing")]
    MissingTitle,

    /// The quiz has no questions.
    #[error("quiz has no questions")]
    NoQuestions,

    /// A question has no correct answer, or the answer is blank.
    #[error("question {index} has no answer")]
    MissingAnswer { index: usize },

    /// A question has no media reference, or the reference is blank.
    #[error("question {index} has no photo")]
    MissingMedia { index: usize },
}

impl QuizError {
    /// Positional index of the offending question, if the error is per-question.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            QuizError::MissingAnswer { index } | QuizError::MissingMedia { index } => Some(*index),
            QuizError::MissingTitle | QuizError::NoQuestions => None,
        }
    }
}

/// Errors a presenter may report when asked to play a sound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The environment refused playback (e.g. autoplay restrictions).
    #[error("playback blocked: {0}")]
    Blocked(String),

    /// The sound resource could not be loaded or no output device exists.
    #[error("sound unavailable: {0}")]
    Unavailable(String),
}
