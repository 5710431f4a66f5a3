//! GetResultStatisticsHandler - Result counts per analysis.

use std::sync::Arc;

use super::QuizError;
use crate::domain::foundation::AnalysisId;
use crate::domain::resolution::ResultStatistics;
use crate::ports::ResultRepository;

pub struct GetResultStatisticsHandler {
    results: Arc<dyn ResultRepository>,
}

impl GetResultStatisticsHandler {
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    pub async fn handle(&self, analysis_id: AnalysisId) -> Result<ResultStatistics, QuizError> {
        let results = self.results.find_by_analysis(&analysis_id).await?;
        Ok(ResultStatistics::tally(analysis_id, &results))
    }
}
