//! quizmaker-core: quiz model, distractor sampling and the session engine.
//!
//! This crate defines the quiz data model and loader, the distractor sampler,
//! scoring tiers, and the event-driven session state machine that front ends
//! drive through the `Presenter` trait.

pub mod config;
pub mod error;
pub mod model;
pub mod offline;
pub mod parser;
pub mod presenter;
pub mod report;
pub mod sampler;
pub mod scoring;
pub mod session;

pub use config::SessionConfig;
pub use error::{PlaybackError, QuizError};
pub use model::{AnswerPool, Outcome, Question, Quiz};
pub use presenter::{Presenter, SoundKind};
pub use scoring::{AttemptSummary, ResultTier};
pub use session::{AdvanceTicket, ScheduledAdvance, Session};
