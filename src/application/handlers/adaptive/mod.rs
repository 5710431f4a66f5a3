//! Adaptive session handlers.
//!
//! All mutations of one session go through `SessionLocks`, so start,
//! submit, abandon and the stale sweep never interleave on the same id
//! within one process. Across processes the repositories only write over an
//! in-progress row.

mod abandon_session;
mod question_generator;
mod session_locks;
mod settings;
mod start_session;
mod submit_answer;
mod sweep_stale_sessions;

#[cfg(test)]
mod test_support;

pub use abandon_session::AbandonSessionHandler;
pub use question_generator::QuestionGenerator;
pub use session_locks::{SessionGuard, SessionLocks};
pub use settings::{AdaptiveSettings, DEFAULT_CONTEXT_ANSWERS};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
pub use sweep_stale_sessions::{SweepReport, SweepStaleSessionsHandler};
