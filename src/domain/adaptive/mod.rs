//! Adaptive module - Generated-question quiz sessions.
//!
//! A session is created, receives one generated question at a time,
//! and completes once the configured number of questions is answered.
//! Abandonment happens only through administration or the stale sweep.

mod aggregate;
mod errors;
mod question;
mod status;
mod theme;

pub use aggregate::{AdaptiveSession, AnswerOutcome, DEFAULT_TOTAL_QUESTIONS};
pub use errors::AdaptiveSessionError;
pub use question::{DraftError, GeneratedQuestion, QuestionDraft};
pub use status::{AdaptiveSessionStatus, SessionPhase};
pub use theme::{AdaptiveTheme, AnswerContext, ThemeAxis};
