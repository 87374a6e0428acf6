//! Accuracy, result tiers, and feedback text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Outcome;

/// Integer percentage of correct answers, rounded half up.
///
/// `total` of zero yields zero; a constructed quiz never has zero questions.
pub fn accuracy_percent(correct_count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct_count.min(total) as u64;
    let total = total as u64;
    // round(100 * c / t) == floor((200 * c + t) / (2 * t))
    ((200 * correct + total) / (2 * total)) as u32
}

/// Qualitative bucket for a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    /// Below 40%.
    KeepTrying,
    /// 40% up to 60%.
    AlmostThere,
    /// 60% up to 80%.
    Good,
    /// 80% up to 100%.
    Excellent,
    /// Exactly 100%.
    Perfect,
}

impl ResultTier {
    pub fn from_accuracy(accuracy_percent: u32) -> Self {
        match accuracy_percent {
            100.. => ResultTier::Perfect,
            80..=99 => ResultTier::Excellent,
            60..=79 => ResultTier::Good,
            40..=59 => ResultTier::AlmostThere,
            _ => ResultTier::KeepTrying,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ResultTier::Perfect => "🏆",
            ResultTier::Excellent => "🎉",
            ResultTier::Good => "😊",
            ResultTier::AlmostThere => "💪",
            ResultTier::KeepTrying => "📚",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResultTier::Perfect => "Perfect!",
            ResultTier::Excellent => "Wonderful!",
            ResultTier::Good => "Well done!",
            ResultTier::AlmostThere => "Almost there!",
            ResultTier::KeepTrying => "Keep going!",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.title())
    }
}

/// Score of one finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub correct_count: usize,
    pub total: usize,
    pub accuracy_percent: u32,
    pub tier: ResultTier,
}

impl AttemptSummary {
    pub fn compute(correct_count: usize, total: usize) -> Self {
        let accuracy_percent = accuracy_percent(correct_count, total);
        Self {
            correct_count,
            total,
            accuracy_percent,
            tier: ResultTier::from_accuracy(accuracy_percent),
        }
    }
}

/// Icon and text shown while a graded answer is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub icon: &'static str,
    pub text: String,
}

impl FeedbackMessage {
    pub fn for_outcome(outcome: Outcome, correct_answer: &str) -> Self {
        match outcome {
            Outcome::Correct => Self {
                icon: "⭕",
                text: "Correct!".to_string(),
            },
            Outcome::Incorrect => Self {
                icon: "❌",
                text: format!("Answer: {correct_answer}"),
            },
        }
    }
}
