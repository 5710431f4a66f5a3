//! Lifecycle status and phase of an adaptive session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Persisted lifecycle status of an adaptive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveSessionStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

impl AdaptiveSessionStatus {
    /// Returns the storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptiveSessionStatus::InProgress => "in_progress",
            AdaptiveSessionStatus::Completed => "completed",
            AdaptiveSessionStatus::Abandoned => "abandoned",
        }
    }
}

impl StateMachine for AdaptiveSessionStatus {
    /// Valid transitions:
    /// - InProgress -> Completed
    /// - InProgress -> Abandoned
    fn can_transition_to(&self, target: &Self) -> bool {
        use AdaptiveSessionStatus::*;
        matches!((self, target), (InProgress, Completed) | (InProgress, Abandoned))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AdaptiveSessionStatus::*;
        match self {
            InProgress => vec![Completed, Abandoned],
            Completed | Abandoned => vec![],
        }
    }
}

impl fmt::Display for AdaptiveSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdaptiveSessionStatus::InProgress => "In Progress",
            AdaptiveSessionStatus::Completed => "Completed",
            AdaptiveSessionStatus::Abandoned => "Abandoned",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AdaptiveSessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(AdaptiveSessionStatus::InProgress),
            "completed" => Ok(AdaptiveSessionStatus::Completed),
            "abandoned" => Ok(AdaptiveSessionStatus::Abandoned),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}

/// Where a session stands in its question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No question issued yet.
    Created,
    /// Question `index` is issued and unanswered.
    AwaitingAnswer { index: u32 },
    /// Every question answered but the session is not completed yet.
    ReadyToComplete,
    Completed,
    Abandoned,
}
