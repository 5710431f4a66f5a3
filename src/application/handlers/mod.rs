//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod adaptive;
pub mod interpretation;
pub mod quiz;

pub use adaptive::{
    AbandonSessionHandler, AdaptiveSettings, QuestionGenerator, SessionLocks, StartSessionCommand,
    StartSessionHandler, StartSessionResult, SubmitAnswerCommand, SubmitAnswerHandler,
    SubmitAnswerResult, SweepReport, SweepStaleSessionsHandler,
};
pub use interpretation::{AssembleRequest, AssemblerConfig, InterpretationAssembler};
pub use quiz::{
    CompatibilityView, ComputeResultCommand, ComputeResultHandler, ComputeResultResult,
    GetResultStatisticsHandler, LookupCompatibilityHandler, LookupCompatibilityQuery, MatchView,
    QuizError,
};
