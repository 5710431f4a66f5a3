//! SweepStaleSessionsHandler - Abandons sessions nobody touched in a while.

use std::sync::Arc;

use super::SessionLocks;
use crate::domain::adaptive::AdaptiveSessionError;
use crate::domain::foundation::{ErrorCode, SessionId, Timestamp};
use crate::ports::AdaptiveSessionRepository;

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub abandoned: Vec<SessionId>,
    /// Sessions that failed to save; retried on the next sweep.
    pub failed: Vec<SessionId>,
}

pub struct SweepStaleSessionsHandler {
    sessions: Arc<dyn AdaptiveSessionRepository>,
    locks: Arc<SessionLocks>,
    stale_after_minutes: i64,
}

impl SweepStaleSessionsHandler {
    pub fn new(
        sessions: Arc<dyn AdaptiveSessionRepository>,
        locks: Arc<SessionLocks>,
        stale_after_minutes: i64,
    ) -> Self {
        Self {
            sessions,
            locks,
            stale_after_minutes,
        }
    }

    /// Abandons every in-progress session idle since before `now - ttl`.
    pub async fn handle(&self, now: Timestamp) -> Result<SweepReport, AdaptiveSessionError> {
        let cutoff = now.minus_minutes(self.stale_after_minutes);
        let candidates = self.sessions.find_stale_in_progress(cutoff).await?;
        let mut report = SweepReport::default();

        for candidate in candidates {
            let id = candidate.id();
            let _guard = self.locks.acquire(id).await;

            // Reload under the lock; an answer may have landed meanwhile.
            let mut session = match self.sessions.find_by_id(&id).await? {
                Some(s) if s.is_stale(cutoff) => s,
                _ => continue,
            };
            session.abandon()?;
            match self.sessions.update(&session).await {
                Ok(()) => report.abandoned.push(id),
                // Finished elsewhere between the reload and the write.
                Err(e) if e.code == ErrorCode::SessionNotInProgress => {
                    tracing::debug!(session_id = %id, "Stale session already closed");
                }
                Err(e) => {
                    tracing::warn!(session_id = %id, error = %e, "Failed to abandon stale session");
                    report.failed.push(id);
                }
            }
        }

        if !report.abandoned.is_empty() {
            tracing::info!(
                abandoned = report.abandoned.len(),
                stale_after_minutes = self.stale_after_minutes,
                "Stale adaptive sessions abandoned"
            );
        }
        Ok(report)
    }
}
