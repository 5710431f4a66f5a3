//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Static quizzes are resolved in one command; adaptive sessions advance one
//! answer at a time under a per-session lock.

pub mod handlers;

pub use handlers::{
    // Adaptive session handlers
    AbandonSessionHandler, AdaptiveSettings, QuestionGenerator, SessionLocks,
    StartSessionCommand, StartSessionHandler, StartSessionResult,
    SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult,
    SweepReport, SweepStaleSessionsHandler,
    // Interpretation
    AssembleRequest, AssemblerConfig, InterpretationAssembler,
    // Static quiz handlers
    CompatibilityView, ComputeResultCommand, ComputeResultHandler, ComputeResultResult,
    GetResultStatisticsHandler, LookupCompatibilityHandler, LookupCompatibilityQuery, MatchView,
    QuizError,
};
