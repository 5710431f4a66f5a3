//! Adaptive-session error types.

use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, QuestionId, SessionId};

use super::AdaptiveSessionStatus;

/// Adaptive-session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdaptiveSessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// A session with this id already exists.
    AlreadyExists(SessionId),
    /// The analysis has no adaptive theme or strategy.
    AnalysisNotFound(AnalysisId),
    /// Session is completed or abandoned.
    NotInProgress(AdaptiveSessionStatus),
    /// The question already has an answer.
    AlreadyAnswered(QuestionId),
    /// The question is not the session's outstanding question.
    QuestionNotOutstanding(QuestionId),
    /// Invalid state for operation.
    InvalidState(String),
    /// The generation provider failed or returned an unusable question.
    Generation(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AdaptiveSessionError {
    pub fn not_found(id: SessionId) -> Self {
        AdaptiveSessionError::NotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AdaptiveSessionError::InvalidState(message.into())
    }
    pub fn generation(message: impl Into<String>) -> Self {
        AdaptiveSessionError::Generation(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdaptiveSessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AdaptiveSessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AdaptiveSessionError::NotFound(_) => ErrorCode::SessionNotFound,
            AdaptiveSessionError::AlreadyExists(_) => ErrorCode::SessionAlreadyExists,
            AdaptiveSessionError::AnalysisNotFound(_) => ErrorCode::AnalysisNotFound,
            AdaptiveSessionError::NotInProgress(_) => ErrorCode::SessionNotInProgress,
            AdaptiveSessionError::AlreadyAnswered(_) => ErrorCode::AlreadyAnswered,
            AdaptiveSessionError::QuestionNotOutstanding(_) => ErrorCode::QuestionNotOutstanding,
            AdaptiveSessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AdaptiveSessionError::Generation(_) => ErrorCode::AIProviderError,
            AdaptiveSessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AdaptiveSessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AdaptiveSessionError::NotFound(id) => format!("Session not found: {}", id),
            AdaptiveSessionError::AlreadyExists(id) => format!("Session already exists: {}", id),
            AdaptiveSessionError::AnalysisNotFound(id) => {
                format!("Analysis has no adaptive setup: {}", id)
            }
            AdaptiveSessionError::NotInProgress(status) => {
                format!("Session is not in progress (status: {})", status)
            }
            AdaptiveSessionError::AlreadyAnswered(id) => {
                format!("Question already answered: {}", id)
            }
            AdaptiveSessionError::QuestionNotOutstanding(id) => {
                format!("Question is not the outstanding question: {}", id)
            }
            AdaptiveSessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AdaptiveSessionError::Generation(msg) => format!("Question generation failed: {}", msg),
            AdaptiveSessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AdaptiveSessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdaptiveSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdaptiveSessionError {}

impl From<DomainError> for AdaptiveSessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => AdaptiveSessionError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::StrategyNotSupported => AdaptiveSessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::AIProviderError => AdaptiveSessionError::Generation(err.message),
            ErrorCode::SessionNotInProgress => match err
                .details
                .get("status")
                .and_then(|s| s.parse::<AdaptiveSessionStatus>().ok())
            {
                Some(status) => AdaptiveSessionError::NotInProgress(status),
                None => AdaptiveSessionError::InvalidState(err.message),
            },
            _ => AdaptiveSessionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AdaptiveSessionError> for DomainError {
    fn from(err: AdaptiveSessionError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err {
            AdaptiveSessionError::NotInProgress(status) => {
                domain.with_detail("status", status.as_str())
            }
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_in_progress_survives_domain_error_conversion() {
        let domain = DomainError::from(AdaptiveSessionError::NotInProgress(
            AdaptiveSessionStatus::Abandoned,
        ));
        assert_eq!(domain.code, ErrorCode::SessionNotInProgress);

        assert_eq!(
            AdaptiveSessionError::from(domain),
            AdaptiveSessionError::NotInProgress(AdaptiveSessionStatus::Abandoned)
        );
    }

    #[test]
    fn not_in_progress_without_status_is_invalid_state() {
        let domain = DomainError::new(ErrorCode::SessionNotInProgress, "closed");
        assert!(matches!(
            AdaptiveSessionError::from(domain),
            AdaptiveSessionError::InvalidState(_)
        ));
    }
}
