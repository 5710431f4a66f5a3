//! Per-analysis result statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::QuizResult;
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Counts of stored results for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStatistics {
    pub analysis_id: AnalysisId,
    pub total_results: usize,
    /// Results per composed key. Keyless results only count toward the total.
    pub counts_by_key: BTreeMap<String, usize>,
    pub latest_result_at: Option<Timestamp>,
}

impl ResultStatistics {
    /// Tallies the given results.
    pub fn tally(analysis_id: AnalysisId, results: &[QuizResult]) -> Self {
        let mut counts_by_key = BTreeMap::new();
        for key in results.iter().filter_map(|r| r.result_key()) {
            *counts_by_key.entry(key.to_string()).or_insert(0) += 1;
        }

        Self {
            analysis_id,
            total_results: results.len(),
            counts_by_key,
            latest_result_at: results.iter().map(|r| r.created_at).max(),
        }
    }
}
