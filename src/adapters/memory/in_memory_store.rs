//! In-Memory Quiz Store Adapter
//!
//! Stores adaptive sessions and quiz results in memory behind a single
//! lock, so a session completion and its result land in one critical
//! section. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::adaptive::{AdaptiveSession, AdaptiveSessionError, AdaptiveSessionStatus};
use crate::domain::foundation::{
    AnalysisId, DomainError, ErrorCode, SessionId, Timestamp,
};
use crate::domain::resolution::QuizResult;
use crate::ports::{AdaptiveSessionRepository, ResultRepository};

#[derive(Debug, Default)]
struct StoreState {
    sessions: HashMap<SessionId, AdaptiveSession>,
    /// Results keyed by session; one per session.
    results: HashMap<SessionId, QuizResult>,
}

impl StoreState {
    fn insert_result_if_absent(&mut self, result: &QuizResult) -> QuizResult {
        self.results
            .entry(result.session_id)
            .or_insert_with(|| result.clone())
            .clone()
    }
}

/// In-memory implementation of the session and result repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuizStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.sessions.clear();
        state.results.clear();
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn result_count(&self) -> usize {
        self.state.read().await.results.len()
    }
}

fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::new(
        ErrorCode::SessionNotFound,
        format!("Session not found: {}", id),
    )
}

/// Only an in-progress stored session may be overwritten.
fn ensure_writable(
    sessions: &HashMap<SessionId, AdaptiveSession>,
    id: &SessionId,
) -> Result<(), DomainError> {
    match sessions.get(id) {
        None => Err(session_not_found(id)),
        Some(stored) if stored.status() != AdaptiveSessionStatus::InProgress => {
            Err(AdaptiveSessionError::NotInProgress(stored.status()).into())
        }
        Some(_) => Ok(()),
    }
}

#[async_trait]
impl AdaptiveSessionRepository for InMemoryQuizStore {
    async fn save_new(&self, session: &AdaptiveSession) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.sessions.contains_key(&session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyExists,
                format!("Session already exists: {}", session.id()),
            ));
        }
        state.sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &AdaptiveSession) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        ensure_writable(&state.sessions, &session.id())?;
        state.sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn complete(
        &self,
        session: &AdaptiveSession,
        result: &QuizResult,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        ensure_writable(&state.sessions, &session.id())?;
        state.insert_result_if_absent(result);
        state.sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AdaptiveSession>, DomainError> {
        Ok(self.state.read().await.sessions.get(id).cloned())
    }

    async fn find_stale_in_progress(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<AdaptiveSession>, DomainError> {
        let state = self.state.read().await;
        let mut stale: Vec<AdaptiveSession> = state
            .sessions
            .values()
            .filter(|s| s.is_stale(cutoff))
            .cloned()
            .collect();
        stale.sort_by_key(|s| s.updated_at());
        Ok(stale)
    }
}

#[async_trait]
impl ResultRepository for InMemoryQuizStore {
    async fn save_if_absent(&self, result: &QuizResult) -> Result<QuizResult, DomainError> {
        Ok(self.state.write().await.insert_result_if_absent(result))
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<QuizResult>, DomainError> {
        Ok(self.state.read().await.results.get(session_id).cloned())
    }

    async fn find_by_analysis(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Vec<QuizResult>, DomainError> {
        let state = self.state.read().await;
        let mut results: Vec<QuizResult> = state
            .results
            .values()
            .filter(|r| &r.analysis_id == analysis_id)
            .cloned()
            .collect();
        results.sort_by_key(|r| r.created_at);
        Ok(results)
    }
}
