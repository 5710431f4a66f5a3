//! Tunables shared by the adaptive handlers.

use crate::domain::adaptive::DEFAULT_TOTAL_QUESTIONS;
use crate::domain::interpretation::PersonalizationMode;

/// Number of previous answers sent as context for the next question.
pub const DEFAULT_CONTEXT_ANSWERS: usize = 3;

#[derive(Debug, Clone)]
pub struct AdaptiveSettings {
    pub total_questions: u32,
    pub context_answers: usize,
    /// Personalization applied to the interpretation assembled on completion.
    pub personalization: PersonalizationMode,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            context_answers: DEFAULT_CONTEXT_ANSWERS,
            personalization: PersonalizationMode::None,
        }
    }
}
