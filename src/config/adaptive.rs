//! Adaptive session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Adaptive session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveConfig {
    /// Questions per session
    #[serde(default = "default_total_questions")]
    pub total_questions: u32,

    /// Previous answers sent as context for the next question
    #[serde(default = "default_context_answers")]
    pub context_answers: usize,

    /// Minutes without activity before a session is abandoned
    #[serde(default = "default_stale_after")]
    pub stale_after_minutes: i64,

    /// Seconds between stale-session sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl AdaptiveConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_questions == 0 {
            return Err(ValidationError::InvalidQuestionCount);
        }
        if self.stale_after_minutes <= 0 {
            return Err(ValidationError::InvalidStaleAfter);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            total_questions: default_total_questions(),
            context_answers: default_context_answers(),
            stale_after_minutes: default_stale_after(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_total_questions() -> u32 {
    12
}

fn default_context_answers() -> usize {
    3
}

fn default_stale_after() -> i64 {
    60
}

fn default_sweep_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_defaults() {
        let config = AdaptiveConfig::default();
        assert_eq!(config.total_questions, 12);
        assert_eq!(config.context_answers, 3);
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_questions_rejected() {
        let config = AdaptiveConfig {
            total_questions: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQuestionCount));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let config = AdaptiveConfig {
            stale_after_minutes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStaleAfter));
    }
}
