//! Line-oriented terminal presenter.

use std::io::Write;

use quizmaker_core::{Outcome, PlaybackError, Presenter, ResultTier, SoundKind};

/// Renders a session as plain text. Sound cues become a terminal bell.
pub struct TerminalPresenter<W: Write> {
    out: W,
    bell: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, bell: true }
    }

    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    /// Write a prompt line without a trailing newline.
    pub fn prompt(&mut self, text: &str) {
        self.write(format_args!("{text}"));
        if let Err(e) = self.out.flush() {
            tracing::debug!("terminal flush failed: {e}");
        }
    }

    pub fn note(&mut self, text: &str) {
        self.write(format_args!("{text}\n"));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args) {
            tracing::debug!("terminal write failed: {e}");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_question(&mut self, media: &str, choices: &[String]) {
        self.write(format_args!("Photo: {media}\n"));
        for (i, choice) in choices.iter().enumerate() {
            self.write(format_args!("  {}) {choice}\n", i + 1));
        }
    }

    fn mark_choice(&mut self, choice: &str, outcome: Outcome) {
        let mark = match outcome {
            Outcome::Correct => "✔",
            Outcome::Incorrect => "✘",
        };
        self.write(format_args!("  {mark} {choice}\n"));
    }

    fn show_feedback(&mut self, icon: &str, text: &str) {
        self.write(format_args!("{icon} {text}\n"));
    }

    fn hide_feedback(&mut self) {}

    fn render_progress(&mut self, current_index: usize, total: usize) {
        self.write(format_args!("\n[{}/{total}]\n", current_index + 1));
    }

    fn render_result(
        &mut self,
        correct_count: usize,
        total: usize,
        accuracy_percent: u32,
        tier: ResultTier,
    ) {
        self.write(format_args!(
            "\n{tier}\nScore: {correct_count}/{total} ({accuracy_percent}%)\n"
        ));
    }

    fn play_sound(&mut self, kind: SoundKind) -> Result<(), PlaybackError> {
        if !self.bell {
            return Ok(());
        }
        self.out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush())
            .map_err(|e| PlaybackError::Unavailable(format!("{kind}: {e}")))
    }
}
