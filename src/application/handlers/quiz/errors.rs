//! Errors for static-quiz handlers.

use thiserror::Error;

use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, ValidationError};
use crate::domain::resolution::ResolveError;

/// Errors from computing, looking up or summarizing quiz results.
#[derive(Debug, Clone, Error)]
pub enum QuizError {
    #[error("Analysis not found: {0}")]
    AnalysisNotFound(AnalysisId),

    #[error("Analysis {0} has no result strategy")]
    StrategyMissing(AnalysisId),

    #[error("Expected {expected} answers, got {actual}")]
    IncompleteAnswers { expected: usize, actual: usize },

    #[error("Question '{0}' was answered more than once")]
    DuplicateQuestion(String),

    #[error("Unknown option '{option_id}' for question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },

    #[error("No compatibility entry for '{0}'")]
    CompatibilityNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Store error: {0}")]
    Store(String),
}

impl QuizError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuizError::AnalysisNotFound(_) | QuizError::StrategyMissing(_) => {
                ErrorCode::AnalysisNotFound
            }
            QuizError::IncompleteAnswers { .. }
            | QuizError::DuplicateQuestion(_)
            | QuizError::UnknownOption { .. } => ErrorCode::ValidationFailed,
            QuizError::CompatibilityNotFound(_) => ErrorCode::ResultTypeNotFound,
            QuizError::Validation(e) => DomainError::from(e.clone()).code,
            QuizError::Resolve(e) => e.code(),
            QuizError::Store(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for QuizError {
    fn from(err: DomainError) -> Self {
        QuizError::Store(err.to_string())
    }
}

impl From<QuizError> for DomainError {
    fn from(err: QuizError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
