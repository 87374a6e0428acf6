//! Presentation interface the session engine drives.
//!
//! The engine never touches a UI directly; every visible or audible effect
//! goes through a `Presenter`. Any front end implementing this trait can host
//! a session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::model::Outcome;
use crate::scoring::ResultTier;

/// Sound cues the engine asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKind {
    Question,
    Correct,
    Incorrect,
}

impl SoundKind {
    /// File name of the bundled cue, relative to the content directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SoundKind::Question => "question.mp3",
            SoundKind::Correct => "correct.mp3",
            SoundKind::Incorrect => "incorrect.mp3",
        }
    }
}

impl From<Outcome> for SoundKind {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => SoundKind::Correct,
            Outcome::Incorrect => SoundKind::Incorrect,
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundKind::Question => write!(f, "question"),
            SoundKind::Correct => write!(f, "correct"),
            SoundKind::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Front end for a quiz session.
pub trait Presenter {
    /// Show a question's media and its answer choices, in display order.
    fn render_question(&mut self, media: &str, choices: &[String]);

    /// Highlight a choice as right or wrong.
    fn mark_choice(&mut self, choice: &str, outcome: Outcome);

    fn show_feedback(&mut self, icon: &str, text: &str);

    fn hide_feedback(&mut self);

    /// `current_index` is 0-based.
    fn render_progress(&mut self, current_index: usize, total: usize);

    fn render_result(
        &mut self,
        correct_count: usize,
        total: usize,
        accuracy_percent: u32,
        tier: ResultTier,
    );

    /// Play a cue. Failures are reported but never stop the session.
    fn play_sound(&mut self, kind: SoundKind) -> Result<(), PlaybackError>;
}

/// Presenter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn render_question(&mut self, _: &str, _: &[String]) {}
    fn mark_choice(&mut self, _: &str, _: Outcome) {}
    fn show_feedback(&mut self, _: &str, _: &str) {}
    fn hide_feedback(&mut self) {}
    fn render_progress(&mut self, _: usize, _: usize) {}
    fn render_result(&mut self, _: usize, _: usize, _: u32, _: ResultTier) {}
    fn play_sound(&mut self, _: SoundKind) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// One call received by a `RecordingPresenter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    RenderQuestion {
        media: String,
        choices: Vec<String>,
    },
    MarkChoice {
        choice: String,
        outcome: Outcome,
    },
    ShowFeedback {
        icon: String,
        text: String,
    },
    HideFeedback,
    RenderProgress {
        current_index: usize,
        total: usize,
    },
    RenderResult {
        correct_count: usize,
        total: usize,
        accuracy_percent: u32,
        tier: ResultTier,
    },
    PlaySound(SoundKind),
}

/// Test double that records every call in order.
///
/// With `with_failing_sound`, every `play_sound` call returns an error after
/// being recorded, to exercise the engine's swallow path.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
    fail_sound: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_sound() -> Self {
        Self {
            calls: Vec::new(),
            fail_sound: true,
        }
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// The most recent question render, if any.
    pub fn last_question(&self) -> Option<(&str, &[String])> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::RenderQuestion { media, choices } => {
                Some((media.as_str(), choices.as_slice()))
            }
            _ => None,
        })
    }

    /// Number of `render_question` calls so far.
    pub fn question_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PresenterCall::RenderQuestion { .. }))
            .count()
    }

    /// The most recent result render as `(correct, total, accuracy, tier)`.
    pub fn last_result(&self) -> Option<(usize, usize, u32, ResultTier)> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::RenderResult {
                correct_count,
                total,
                accuracy_percent,
                tier,
            } => Some((*correct_count, *total, *accuracy_percent, *tier)),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render_question(&mut self, media: &str, choices: &[String]) {
        self.calls.push(PresenterCall::RenderQuestion {
            media: media.to_string(),
            choices: choices.to_vec(),
        });
    }

    fn mark_choice(&mut self, choice: &str, outcome: Outcome) {
        self.calls.push(PresenterCall::MarkChoice {
            choice: choice.to_string(),
            outcome,
        });
    }

    fn show_feedback(&mut self, icon: &str, text: &str) {
        self.calls.push(PresenterCall::ShowFeedback {
            icon: icon.to_string(),
            text: text.to_string(),
        });
    }

    fn hide_feedback(&mut self) {
        self.calls.push(PresenterCall::HideFeedback);
    }

    fn render_progress(&mut self, current_index: usize, total: usize) {
        self.calls.push(PresenterCall::RenderProgress {
            current_index,
            total,
        });
    }

    fn render_result(
        &mut self,
        correct_count: usize,
        total: usize,
        accuracy_percent: u32,
        tier: ResultTier,
    ) {
        self.calls.push(PresenterCall::RenderResult {
            correct_count,
            total,
            accuracy_percent,
            tier,
        });
    }

    fn play_sound(&mut self, kind: SoundKind) -> Result<(), PlaybackError> {
        self.calls.push(PresenterCall::PlaySound(kind));
        if self.fail_sound {
            Err(PlaybackError::Blocked(format!("{kind} cue refused")))
        } else {
            Ok(())
        }
    }
}
