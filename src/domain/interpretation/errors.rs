//! Error types for interpretation assembly.

use thiserror::Error;

use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, Gender};

/// Errors surfaced by interpretation assembly.
///
/// Personalization failures never appear here; they degrade to stored text.
#[derive(Debug, Clone, Error)]
pub enum InterpretationError {
    #[error("No result type '{result_key}' ({gender}) for analysis {analysis_id}")]
    NotFound {
        analysis_id: AnalysisId,
        result_key: String,
        gender: Gender,
    },

    #[error("Content store error: {0}")]
    Store(String),
}

impl InterpretationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InterpretationError::NotFound { .. } => ErrorCode::ResultTypeNotFound,
            InterpretationError::Store(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for InterpretationError {
    fn from(err: DomainError) -> Self {
        InterpretationError::Store(err.to_string())
    }
}

impl From<InterpretationError> for DomainError {
    fn from(err: InterpretationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_lookup_key() {
        let err = InterpretationError::NotFound {
            analysis_id: AnalysisId::new("mbti").unwrap(),
            result_key: "E-N-F-J".to_string(),
            gender: Gender::Female,
        };
        assert_eq!(
            err.to_string(),
            "No result type 'E-N-F-J' (female) for analysis mbti"
        );
        assert_eq!(err.code(), ErrorCode::ResultTypeNotFound);
    }
}
