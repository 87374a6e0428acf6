//! Core data model types for quizmaker.
//!
//! A `Quiz` is an immutable, validated list of questions. The `AnswerPool`
//! is the set of every correct answer in a quiz and is the only source of
//! distractors.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A single picture question. Identity is its position in the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Reference to the image shown as the prompt.
    #[serde(rename = "photo")]
    pub media: String,
    /// The correct answer text.
    pub answer: String,
}

impl Question {
    pub fn new(media: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            media: media.into(),
            answer: answer.into(),
        }
    }
}

/// A validated quiz: a title and at least one complete question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz, rejecting records the session engine cannot run.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::MissingTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.answer.trim().is_empty() {
                return Err(QuizError::MissingAnswer { index });
            }
            if question.media.trim().is_empty() {
                return Err(QuizError::MissingMedia { index });
            }
        }
        Ok(Self { title, questions })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions; never zero.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false` for a constructed quiz; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Derive the answer pool from this quiz's questions.
    pub fn answer_pool(&self) -> AnswerPool {
        self.questions.iter().map(|q| q.answer.clone()).collect()
    }
}

/// Distinct correct answers across a quiz, in first-seen order.
///
/// Duplicates handed to the constructor are collapsed, so a pool built from
/// a builder's already-deduplicated list and one built from raw questions
/// are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerPool {
    answers: Vec<String>,
}

impl AnswerPool {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        answers.into_iter().map(Into::into).collect()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn contains(&self, answer: &str) -> bool {
        self.answers.iter().any(|a| a == answer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(String::as_str)
    }

    /// Number of pool entries usable as distractors for `correct`.
    pub fn distractor_count(&self, correct: &str) -> usize {
        self.iter().filter(|a| *a != correct).count()
    }
}

impl<S: Into<String>> FromIterator<S> for AnswerPool {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut seen = HashSet::new();
        let mut answers = Vec::new();
        for answer in iter {
            let answer = answer.into();
            if seen.insert(answer.clone()) {
                answers.push(answer);
            }
        }
        Self { answers }
    }
}

/// Whether a graded choice was right or wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// One entry of a content directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizListing {
    /// File stem of the quiz record (used for page names).
    pub name: String,
    pub title: String,
    pub question_count: usize,
}
