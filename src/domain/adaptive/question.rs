//! Generated questions and the provider draft they are built from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Choice, QuestionId, SessionId, Timestamp};

/// A question produced by the generation provider.
///
/// Immutable apart from the single answer write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: QuestionId,
    pub session_id: SessionId,
    /// 1-based position in the session.
    pub index: u32,
    pub text: String,
    pub option_1: String,
    pub option_2: String,
    pub hint: Option<String>,
    /// Axis the question measures.
    pub category: Option<String>,
    pub answer: Option<Choice>,
    pub answered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl GeneratedQuestion {
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    /// Text of the chosen option, once answered.
    pub fn chosen_option(&self) -> Option<&str> {
        self.answer.map(|choice| match choice {
            Choice::First => self.option_1.as_str(),
            Choice::Second => self.option_2.as_str(),
        })
    }
}

/// Rejection of a malformed question draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Draft field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Draft has no category")]
    MissingCategory,

    #[error("Draft category '{0}' is not an axis of this analysis")]
    UnknownCategory(String),
}

/// Question as returned by the provider, before it joins a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_text: String,
    pub option_1: String,
    pub option_2: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl QuestionDraft {
    /// Checks required fields. When `axes` is non-empty the draft must be
    /// tagged with one of them so its answer can be scored.
    pub fn validate(self, axes: &[String]) -> Result<Self, DraftError> {
        if self.question_text.trim().is_empty() {
            return Err(DraftError::EmptyField("question_text"));
        }
        if self.option_1.trim().is_empty() {
            return Err(DraftError::EmptyField("option_1"));
        }
        if self.option_2.trim().is_empty() {
            return Err(DraftError::EmptyField("option_2"));
        }
        if !axes.is_empty() {
            let category = self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or(DraftError::MissingCategory)?;
            if !axes.iter().any(|a| a == category) {
                return Err(DraftError::UnknownCategory(category.to_string()));
            }
        }
        Ok(self)
    }
}
