//! The quiz session engine.
//!
//! A session moves through `Loading → Presenting(i) → Feedback(i) →
//! Presenting(i + 1) … → Complete`, and `restart` goes back to `Loading`.
//! Grading happens inside the `select` transition and is never observable as
//! a resting phase.
//!
//! Transitions are plain functions that consume an [`Attempt`] and return the
//! next one together with the presentation effects it produced. [`Session`]
//! owns the attempt, the injected RNG and presenter, and applies the effects.
//!
//! The delayed move from feedback to the next question is not run by the
//! engine. `select` hands back a [`ScheduledAdvance`]; the host waits for its
//! delay and calls [`Session::advance`] with the ticket. A ticket is bound to
//! one attempt generation and one question, so a timer that fires after a
//! restart, or twice, does nothing.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::SessionConfig;
use crate::model::{AnswerPool, Outcome, Question, Quiz};
use crate::presenter::{Presenter, SoundKind};
use crate::report::{AnswerRecord, AttemptReport};
use crate::sampler::sample_choices;
use crate::scoring::{AttemptSummary, FeedbackMessage};

/// Handle for a pending advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    generation: u64,
    index: usize,
}

impl AdvanceTicket {
    /// Position of the question whose feedback this ticket ends.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A delayed advance the host must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub ticket: AdvanceTicket,
    pub delay: Duration,
}

/// Where an attempt currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// Before the first question of an attempt is shown.
    #[default]
    Loading,
    /// A question is on screen and waiting for one selection.
    Presenting { index: usize, choices: Vec<String> },
    /// A selection was graded; waiting for the advance ticket.
    Feedback {
        index: usize,
        choices: Vec<String>,
        selected: String,
        outcome: Outcome,
        ticket: AdvanceTicket,
    },
    /// Every question was answered.
    Complete(AttemptSummary),
}

/// A presentation side effect produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Progress { current_index: usize, total: usize },
    Sound(SoundKind),
    Question { media: String, choices: Vec<String> },
    Mark { choice: String, outcome: Outcome },
    ShowFeedback(FeedbackMessage),
    HideFeedback,
    Result(AttemptSummary),
}

/// Mutable state of one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    order: Vec<usize>,
    correct_count: usize,
    generation: u64,
    phase: Phase,
    answers: Vec<AnswerRecord>,
}

/// Output of a transition.
#[derive(Debug)]
pub struct Step {
    pub attempt: Attempt,
    pub effects: Vec<Effect>,
    pub scheduled: Option<ScheduledAdvance>,
}

impl Step {
    fn quiet(attempt: Attempt) -> Self {
        Self {
            attempt,
            effects: Vec::new(),
            scheduled: None,
        }
    }
}

/// Read-only inputs every transition needs.
pub struct Context<'a, R: ?Sized> {
    pub quiz: &'a Quiz,
    pub pool: &'a AnswerPool,
    pub config: &'a SessionConfig,
    pub rng: &'a mut R,
}

impl Attempt {
    /// `Loading → Presenting(0)` for a fresh attempt with its own permutation.
    pub fn begin<R: Rng + ?Sized>(generation: u64, ctx: &mut Context<'_, R>) -> Step {
        let mut order: Vec<usize> = (0..ctx.quiz.len()).collect();
        order.shuffle(ctx.rng);

        let attempt = Attempt {
            order,
            correct_count: 0,
            generation,
            phase: Phase::Loading,
            answers: Vec::new(),
        };
        attempt.present(0, ctx)
    }

    /// Enter `Presenting(index)`, or `Complete` once the order is exhausted.
    pub fn present<R: Rng + ?Sized>(mut self, index: usize, ctx: &mut Context<'_, R>) -> Step {
        let quiz = ctx.quiz;
        let total = self.order.len();
        let Some(question) = self.order.get(index).map(|&q| &quiz.questions()[q]) else {
            let summary = AttemptSummary::compute(self.correct_count, total);
            self.phase = Phase::Complete(summary);
            return Step {
                attempt: self,
                effects: vec![Effect::Result(summary)],
                scheduled: None,
            };
        };

        let choices = sample_choices(
            &question.answer,
            ctx.pool,
            ctx.config.max_distractors,
            ctx.rng,
        );
        let effects = vec![
            Effect::Progress {
                current_index: index,
                total,
            },
            Effect::Sound(SoundKind::Question),
            Effect::Question {
                media: question.media.clone(),
                choices: choices.clone(),
            },
        ];
        self.phase = Phase::Presenting { index, choices };

        Step {
            attempt: self,
            effects,
            scheduled: None,
        }
    }

    /// `Presenting(i) → Feedback(i)`: grade one selection.
    ///
    /// Outside `Presenting` this is a no-op, so a second click on the same
    /// question can never be graded. A selection that is not one of the
    /// displayed choices is dropped as well.
    pub fn select<R: ?Sized>(mut self, selected: &str, ctx: &mut Context<'_, R>) -> Step {
        let (index, choices) = match std::mem::take(&mut self.phase) {
            Phase::Presenting { index, choices } if choices.iter().any(|c| c == selected) => {
                (index, choices)
            }
            Phase::Presenting { index, choices } => {
                tracing::debug!("selection {selected:?} ignored: not a displayed choice");
                self.phase = Phase::Presenting { index, choices };
                return Step::quiet(self);
            }
            other => {
                tracing::debug!("selection {selected:?} ignored: not accepting input");
                self.phase = other;
                return Step::quiet(self);
            }
        };

        let quiz = ctx.quiz;
        let question = &quiz.questions()[self.order[index]];
        let outcome = if selected == question.answer {
            self.correct_count += 1;
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        let mut effects = vec![Effect::Mark {
            choice: selected.to_string(),
            outcome,
        }];
        if outcome == Outcome::Incorrect {
            effects.push(Effect::Mark {
                choice: question.answer.clone(),
                outcome: Outcome::Correct,
            });
        }
        effects.push(Effect::ShowFeedback(FeedbackMessage::for_outcome(
            outcome,
            &question.answer,
        )));
        effects.push(Effect::Sound(outcome.into()));

        self.answers.push(AnswerRecord {
            media: question.media.clone(),
            correct_answer: question.answer.clone(),
            selected: selected.to_string(),
            outcome,
        });

        let ticket = AdvanceTicket {
            generation: self.generation,
            index,
        };
        self.phase = Phase::Feedback {
            index,
            choices,
            selected: selected.to_string(),
            outcome,
            ticket,
        };

        Step {
            attempt: self,
            effects,
            scheduled: Some(ScheduledAdvance {
                ticket,
                delay: ctx.config.feedback_delay(),
            }),
        }
    }

    /// `Feedback(i) → Presenting(i + 1)` when `ticket` is the pending one.
    pub fn advance<R: Rng + ?Sized>(self, ticket: AdvanceTicket, ctx: &mut Context<'_, R>) -> Step {
        let next = match &self.phase {
            Phase::Feedback {
                index,
                ticket: pending,
                ..
            } if *pending == ticket => Some(index + 1),
            _ => None,
        };

        match next {
            Some(next) => {
                let mut step = self.present(next, ctx);
                step.effects.insert(0, Effect::HideFeedback);
                step
            }
            None => {
                tracing::debug!(
                    "stale advance ticket for question {} (generation {})",
                    ticket.index,
                    ticket.generation
                );
                Step::quiet(self)
            }
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Question positions in the order this attempt asks them.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 0-based cursor; equals the question count once complete.
    pub fn current_index(&self) -> usize {
        match &self.phase {
            Phase::Loading => 0,
            Phase::Presenting { index, .. } | Phase::Feedback { index, .. } => *index,
            Phase::Complete(_) => self.order.len(),
        }
    }

    pub fn accepting_input(&self) -> bool {
        matches!(self.phase, Phase::Presenting { .. })
    }
}

/// A quiz session bound to one presenter.
pub struct Session<P, R = StdRng> {
    quiz: Quiz,
    pool: AnswerPool,
    config: SessionConfig,
    rng: R,
    presenter: P,
    attempt: Attempt,
}

impl<P: Presenter> Session<P, StdRng> {
    /// Start a session, seeding the RNG from `config.seed` or the OS.
    pub fn new(quiz: Quiz, pool: AnswerPool, config: SessionConfig, presenter: P) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(quiz, pool, config, presenter, rng)
    }
}

impl<P: Presenter, R: Rng> Session<P, R> {
    /// Start a session with an explicit random source.
    ///
    /// The first question is presented before this returns.
    pub fn with_rng(
        quiz: Quiz,
        pool: AnswerPool,
        config: SessionConfig,
        presenter: P,
        rng: R,
    ) -> Self {
        let mut session = Self {
            quiz,
            pool,
            config,
            rng,
            presenter,
            attempt: Attempt::default(),
        };
        tracing::info!(
            "starting quiz {:?} ({} questions, {} answers in pool)",
            session.quiz.title(),
            session.quiz.len(),
            session.pool.len()
        );
        session.begin_attempt(1);
        session
    }

    /// Submit the user's choice for the current question.
    ///
    /// Returns the advance to schedule, or `None` if the selection was
    /// discarded because no question is awaiting input.
    pub fn select(&mut self, answer: &str) -> Option<ScheduledAdvance> {
        let attempt = std::mem::take(&mut self.attempt);
        let mut ctx = Context {
            quiz: &self.quiz,
            pool: &self.pool,
            config: &self.config,
            rng: &mut self.rng,
        };
        let step = attempt.select(answer, &mut ctx);
        self.apply(step)
    }

    /// Select the `n`th displayed choice (0-based).
    pub fn select_choice(&mut self, n: usize) -> Option<ScheduledAdvance> {
        let choice = self.current_choices()?.get(n)?.clone();
        self.select(&choice)
    }

    /// Fire a scheduled advance. Returns `false` if the ticket was stale.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        let attempt = std::mem::take(&mut self.attempt);
        let mut ctx = Context {
            quiz: &self.quiz,
            pool: &self.pool,
            config: &self.config,
            rng: &mut self.rng,
        };
        let step = attempt.advance(ticket, &mut ctx);
        let moved = !step.effects.is_empty();
        self.apply(step);
        moved
    }

    /// Throw away the current attempt and start a new one.
    ///
    /// Any outstanding ticket belongs to the old generation and becomes inert.
    pub fn restart(&mut self) {
        let generation = self.attempt.generation + 1;
        tracing::info!("restarting quiz {:?} (attempt {generation})", self.quiz.title());
        self.begin_attempt(generation);
    }

    fn begin_attempt(&mut self, generation: u64) {
        let mut ctx = Context {
            quiz: &self.quiz,
            pool: &self.pool,
            config: &self.config,
            rng: &mut self.rng,
        };
        let step = Attempt::begin(generation, &mut ctx);
        self.apply(step);
    }

    fn apply(&mut self, step: Step) -> Option<ScheduledAdvance> {
        self.attempt = step.attempt;
        for effect in step.effects {
            match effect {
                Effect::Progress {
                    current_index,
                    total,
                } => self.presenter.render_progress(current_index, total),
                Effect::Sound(kind) => {
                    if !self.config.sound {
                        continue;
                    }
                    if let Err(e) = self.presenter.play_sound(kind) {
                        tracing::debug!("{kind} sound failed: {e}");
                    }
                }
                Effect::Question { media, choices } => {
                    self.presenter.render_question(&media, &choices)
                }
                Effect::Mark { choice, outcome } => self.presenter.mark_choice(&choice, outcome),
                Effect::ShowFeedback(feedback) => {
                    self.presenter.show_feedback(feedback.icon, &feedback.text)
                }
                Effect::HideFeedback => self.presenter.hide_feedback(),
                Effect::Result(summary) => {
                    tracing::info!(
                        "quiz {:?} complete: {}/{} ({}%)",
                        self.quiz.title(),
                        summary.correct_count,
                        summary.total,
                        summary.accuracy_percent
                    );
                    self.presenter.render_result(
                        summary.correct_count,
                        summary.total,
                        summary.accuracy_percent,
                        summary.tier,
                    )
                }
            }
        }
        step.scheduled
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn pool(&self) -> &AnswerPool {
        &self.pool
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn phase(&self) -> &Phase {
        self.attempt.phase()
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub fn current_index(&self) -> usize {
        self.attempt.current_index()
    }

    pub fn correct_count(&self) -> usize {
        self.attempt.correct_count()
    }

    pub fn accepting_input(&self) -> bool {
        self.attempt.accepting_input()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.attempt.phase, Phase::Complete(_))
    }

    /// The question at the cursor, while one is on screen.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.attempt.phase {
            Phase::Presenting { index, .. } | Phase::Feedback { index, .. } => {
                Some(&self.quiz.questions()[self.attempt.order[*index]])
            }
            Phase::Loading | Phase::Complete(_) => None,
        }
    }

    /// Choices of the question on screen, in display order.
    pub fn current_choices(&self) -> Option<&[String]> {
        match &self.attempt.phase {
            Phase::Presenting { choices, .. } | Phase::Feedback { choices, .. } => Some(choices),
            Phase::Loading | Phase::Complete(_) => None,
        }
    }

    pub fn summary(&self) -> Option<AttemptSummary> {
        match self.attempt.phase {
            Phase::Complete(summary) => Some(summary),
            _ => None,
        }
    }

    /// Report for the attempt, once it is complete.
    pub fn report(&self) -> Option<AttemptReport> {
        let summary = self.summary()?;
        Some(AttemptReport {
            quiz_title: self.quiz.title().to_string(),
            completed_at: chrono::Utc::now(),
            attempt: self.attempt.generation,
            summary,
            answers: self.attempt.answers.clone(),
        })
    }
}
