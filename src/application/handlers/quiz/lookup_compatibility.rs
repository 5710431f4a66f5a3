//! LookupCompatibilityHandler - Best and worst matches of a result type.

use std::sync::Arc;

use super::QuizError;
use crate::domain::foundation::{AnalysisId, Gender};
use crate::domain::resolution::CompatibilityMatch;
use crate::ports::QuizContentStore;

/// Query for the compatibility of one result key.
#[derive(Debug, Clone)]
pub struct LookupCompatibilityQuery {
    pub analysis_id: AnalysisId,
    pub result_key: String,
    pub gender: Gender,
}

/// One resolved side of a compatibility entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub result_key: String,
    /// Title of the matched result type, when the catalog defines one.
    pub title: Option<String>,
    pub reason: String,
}

/// Compatibility of one result key, worded for the asked gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityView {
    pub result_key: String,
    pub best: MatchView,
    pub worst: MatchView,
}

pub struct LookupCompatibilityHandler {
    content: Arc<dyn QuizContentStore>,
}

impl LookupCompatibilityHandler {
    pub fn new(content: Arc<dyn QuizContentStore>) -> Self {
        Self { content }
    }

    pub async fn handle(&self, query: LookupCompatibilityQuery) -> Result<CompatibilityView, QuizError> {
        let entry = self
            .content
            .compatibility(&query.analysis_id, &query.result_key)
            .await?
            .ok_or_else(|| QuizError::CompatibilityNotFound(query.result_key.clone()))?;

        let best = self.view(&query, &entry.best).await?;
        let worst = self.view(&query, &entry.worst).await?;

        Ok(CompatibilityView {
            result_key: entry.result_key,
            best,
            worst,
        })
    }

    async fn view(
        &self,
        query: &LookupCompatibilityQuery,
        matched: &CompatibilityMatch,
    ) -> Result<MatchView, QuizError> {
        let title = self
            .content
            .find_result_type(&query.analysis_id, &matched.result_key, query.gender)
            .await?
            .map(|definition| definition.title);

        Ok(MatchView {
            result_key: matched.result_key.clone(),
            title,
            reason: matched.reason_for(query.gender).to_string(),
        })
    }
}
