//! Compatibility entries between result types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisId, Gender};

/// One side of a compatibility entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityMatch {
    pub result_key: String,
    pub reason: String,
    /// Reason written for female readers; `reason` is used when absent.
    #[serde(default)]
    pub female_reason: Option<String>,
}

impl CompatibilityMatch {
    pub fn new(result_key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            result_key: result_key.into(),
            reason: reason.into(),
            female_reason: None,
        }
    }

    pub fn with_female_reason(mut self, reason: impl Into<String>) -> Self {
        self.female_reason = Some(reason.into());
        self
    }

    /// Returns the reason written for the given gender.
    pub fn reason_for(&self, gender: Gender) -> &str {
        match (gender, &self.female_reason) {
            (Gender::Female, Some(reason)) => reason,
            _ => &self.reason,
        }
    }
}

/// Best and worst matches of one result type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub analysis_id: AnalysisId,
    pub result_key: String,
    pub best: CompatibilityMatch,
    pub worst: CompatibilityMatch,
}
