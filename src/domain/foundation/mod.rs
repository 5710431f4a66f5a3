//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the quiz domain.

mod choice;
mod errors;
mod gender;
mod ids;
mod state_machine;
mod timestamp;

pub use choice::Choice;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use gender::Gender;
pub use ids::{AnalysisId, OptionId, QuestionId, ResultId, ResultTypeId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
