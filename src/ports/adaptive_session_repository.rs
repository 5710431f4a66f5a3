//! Adaptive session repository port.
//!
//! Every save writes the whole aggregate (session row plus its questions
//! and answers) as one atomic unit.

use async_trait::async_trait;

use crate::domain::adaptive::AdaptiveSession;
use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::resolution::QuizResult;

/// Repository port for AdaptiveSession aggregate persistence.
#[async_trait]
pub trait AdaptiveSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyExists` if the id is taken
    /// - `DatabaseError` on persistence failure
    async fn save_new(&self, session: &AdaptiveSession) -> Result<(), DomainError>;

    /// Replace a stored session with its new state.
    ///
    /// Only an in-progress stored session is replaced.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `SessionNotInProgress` if the stored session is completed or abandoned,
    ///   with its status in the `status` detail
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &AdaptiveSession) -> Result<(), DomainError>;

    /// Store the completed session and its result in one atomic write.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `SessionNotInProgress` if the stored session is already closed
    /// - `DatabaseError` on persistence failure
    async fn complete(&self, session: &AdaptiveSession, result: &QuizResult)
        -> Result<(), DomainError>;

    /// Find a session by its ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AdaptiveSession>, DomainError>;

    /// In-progress sessions last touched before `cutoff`.
    async fn find_stale_in_progress(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<AdaptiveSession>, DomainError>;
}
