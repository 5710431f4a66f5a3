//! Quiz result entity.
//!
//! # Design Decisions
//!
//! - **One per session**: a session resolves at most once; recomputation
//!   returns the stored result
//! - **Scores travel with the result**: the score map is derived state and
//!   is only persisted as part of the result

use serde::{Deserialize, Serialize};

use super::ResolvedResult;
use crate::domain::foundation::{AnalysisId, Gender, ResultId, SessionId, Timestamp};
use crate::domain::scoring::AxisScoreMap;

/// Resolved outcome of one completed quiz session.
///
/// # Invariants
///
/// - `session_id` is unique across results
/// - Immutable after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: ResultId,
    pub session_id: SessionId,
    pub analysis_id: AnalysisId,
    pub scores: AxisScoreMap,
    pub resolved: ResolvedResult,
    pub gender: Gender,
    pub created_at: Timestamp,
}

impl QuizResult {
    /// Creates a new result stamped with the current time.
    pub fn new(
        session_id: SessionId,
        analysis_id: AnalysisId,
        scores: AxisScoreMap,
        resolved: ResolvedResult,
        gender: Gender,
    ) -> Self {
        Self {
            id: ResultId::new(),
            session_id,
            analysis_id,
            scores,
            resolved,
            gender,
            created_at: Timestamp::now(),
        }
    }

    /// Composed result key, if the strategy produced one.
    pub fn result_key(&self) -> Option<&str> {
        self.resolved.result_key.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.resolved.title
    }
}
