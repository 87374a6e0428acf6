//! Attempt report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Outcome;
use crate::scoring::AttemptSummary;

/// One graded answer within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Media of the question that was asked.
    pub media: String,
    pub correct_answer: String,
    pub selected: String,
    pub outcome: Outcome,
}

/// A finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    pub quiz_title: String,
    /// When the attempt finished.
    pub completed_at: DateTime<Utc>,
    /// 1 for the first attempt, incremented by each restart.
    pub attempt: u64,
    pub summary: AttemptSummary,
    /// Answers in the order they were given.
    pub answers: Vec<AnswerRecord>,
}

impl AttemptReport {
    /// Answers that were graded incorrect.
    pub fn mistakes(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().filter(|a| !a.outcome.is_correct())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render a short markdown review of the attempt.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("## {}\n\n", self.quiz_title));
        md.push_str(&format!(
            "{}: {}/{} correct ({}%)\n",
            self.summary.tier,
            self.summary.correct_count,
            self.summary.total,
            self.summary.accuracy_percent
        ));

        let mistakes: Vec<_> = self.mistakes().collect();
        if !mistakes.is_empty() {
            md.push_str("\n| Photo | Answer | You chose |\n");
            md.push_str("|-------|--------|-----------|\n");
            for m in mistakes {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    m.media, m.correct_answer, m.selected
                ));
            }
        }

        md
    }
}
