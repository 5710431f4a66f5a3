//! Error types for result resolution.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while parsing a strategy configuration or resolving scores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Strategy not supported: {0}")]
    StrategyNotSupported(String),

    #[error("Invalid strategy configuration: {0}")]
    InvalidConfig(String),
}

impl ResolveError {
    /// Creates an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ResolveError::InvalidConfig(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::StrategyNotSupported(_) => ErrorCode::StrategyNotSupported,
            ResolveError::InvalidConfig(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<ResolveError> for DomainError {
    fn from(err: ResolveError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_not_supported_displays_kind() {
        let err = ResolveError::StrategyNotSupported("tarot".to_string());
        assert_eq!(err.to_string(), "Strategy not supported: tarot");
        assert_eq!(err.code(), ErrorCode::StrategyNotSupported);
    }

    #[test]
    fn converts_to_domain_error() {
        let err: DomainError = ResolveError::invalid_config("needs four axes").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
