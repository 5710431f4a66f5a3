//! Quiz content store port (read side).
//!
//! Authored quiz content: strategy configs, option weights, result-type
//! definitions with their interpretation sections, compatibility entries
//! and adaptive themes. Content is read-only at runtime.

use async_trait::async_trait;

use crate::domain::adaptive::AdaptiveTheme;
use crate::domain::foundation::{AnalysisId, DomainError, Gender, ResultTypeId};
use crate::domain::interpretation::{Interpretation, ResultTypeDefinition};
use crate::domain::resolution::{CompatibilityEntry, StrategyConfig};
use crate::domain::scoring::OptionWeights;

/// Read port for authored quiz content.
#[async_trait]
pub trait QuizContentStore: Send + Sync {
    /// Strategy of an analysis. `None` if the analysis is unknown.
    async fn strategy_config(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<StrategyConfig>, DomainError>;

    /// Number of questions of a static quiz. `None` if unknown.
    async fn question_count(&self, analysis_id: &AnalysisId) -> Result<Option<usize>, DomainError>;

    /// Axis weights of one option. `None` if the option is not authored.
    async fn option_weights(
        &self,
        analysis_id: &AnalysisId,
        question_id: &str,
        option_id: &str,
    ) -> Result<Option<OptionWeights>, DomainError>;

    /// Definition for (analysis, key, gender).
    async fn find_result_type(
        &self,
        analysis_id: &AnalysisId,
        result_key: &str,
        gender: Gender,
    ) -> Result<Option<ResultTypeDefinition>, DomainError>;

    /// All definitions of an analysis for one gender.
    async fn result_types(
        &self,
        analysis_id: &AnalysisId,
        gender: Gender,
    ) -> Result<Vec<ResultTypeDefinition>, DomainError>;

    /// Stored sections of a definition, in authored order.
    async fn interpretations(
        &self,
        result_type_id: &ResultTypeId,
    ) -> Result<Vec<Interpretation>, DomainError>;

    /// Compatibility entry of a result key.
    async fn compatibility(
        &self,
        analysis_id: &AnalysisId,
        result_key: &str,
    ) -> Result<Option<CompatibilityEntry>, DomainError>;

    /// Generation theme of an adaptive analysis.
    async fn adaptive_theme(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<AdaptiveTheme>, DomainError>;
}
