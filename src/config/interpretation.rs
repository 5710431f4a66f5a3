//! Interpretation configuration

use serde::Deserialize;

use crate::domain::interpretation::PersonalizationMode;

/// Interpretation assembly configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InterpretationConfig {
    /// Personalization used when assembling after an adaptive session
    #[serde(default)]
    pub personalization: PersonalizationMode,

    /// Reject rewrites that name another result type
    #[serde(default = "default_direction_guard")]
    pub direction_guard: bool,
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            personalization: PersonalizationMode::default(),
            direction_guard: default_direction_guard(),
        }
    }
}

fn default_direction_guard() -> bool {
    true
}
