//! AbandonSessionHandler - Administrative abandon of an adaptive session.

use std::sync::Arc;

use super::SessionLocks;
use crate::domain::adaptive::{AdaptiveSession, AdaptiveSessionError};
use crate::domain::foundation::SessionId;
use crate::ports::AdaptiveSessionRepository;

pub struct AbandonSessionHandler {
    sessions: Arc<dyn AdaptiveSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl AbandonSessionHandler {
    pub fn new(sessions: Arc<dyn AdaptiveSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { sessions, locks }
    }

    /// Marks an in-progress session abandoned. Answers are kept.
    pub async fn handle(&self, session_id: SessionId) -> Result<AdaptiveSession, AdaptiveSessionError> {
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(AdaptiveSessionError::NotFound(session_id))?;
        session.abandon()?;
        self.sessions.update(&session).await?;

        tracing::info!(
            session_id = %session_id,
            answered = session.current_index(),
            "Adaptive session abandoned"
        );
        Ok(session)
    }
}
