//! Quiz result repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AnalysisId, DomainError, SessionId};
use crate::domain::resolution::QuizResult;

/// Repository port for stored quiz results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Store a result unless the session already has one.
    ///
    /// Returns the stored result: `result` itself, or the one saved earlier
    /// for the same session.
    async fn save_if_absent(&self, result: &QuizResult) -> Result<QuizResult, DomainError>;

    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Option<QuizResult>, DomainError>;

    /// All results of an analysis, oldest first.
    async fn find_by_analysis(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Vec<QuizResult>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ResultRepository) {}
    }
}
