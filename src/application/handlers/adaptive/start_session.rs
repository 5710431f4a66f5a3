//! StartSessionHandler - Opens an adaptive session with its first question.

use std::sync::Arc;

use super::{AdaptiveSettings, QuestionGenerator, SessionLocks};
use crate::domain::adaptive::{AdaptiveSession, AdaptiveSessionError, GeneratedQuestion};
use crate::domain::foundation::{AnalysisId, ErrorCode, Gender, SessionId};
use crate::ports::{AdaptiveSessionRepository, QuizContentStore};

/// Command to start an adaptive session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub session_id: SessionId,
    pub analysis_id: AnalysisId,
    pub gender: Gender,
}

/// Result of a started session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: AdaptiveSession,
    pub question: GeneratedQuestion,
}

/// Handler for starting adaptive sessions.
pub struct StartSessionHandler {
    sessions: Arc<dyn AdaptiveSessionRepository>,
    content: Arc<dyn QuizContentStore>,
    generator: Arc<QuestionGenerator>,
    locks: Arc<SessionLocks>,
    settings: AdaptiveSettings,
}

impl StartSessionHandler {
    pub fn new(
        sessions: Arc<dyn AdaptiveSessionRepository>,
        content: Arc<dyn QuizContentStore>,
        generator: Arc<QuestionGenerator>,
        locks: Arc<SessionLocks>,
        settings: AdaptiveSettings,
    ) -> Self {
        Self {
            sessions,
            content,
            generator,
            locks,
            settings,
        }
    }

    /// Starts a session and issues question 1.
    ///
    /// Nothing is persisted when generation fails.
    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, AdaptiveSessionError> {
        let _guard = self.locks.acquire(cmd.session_id).await;

        // 1. Session ids are never reused
        if self.sessions.find_by_id(&cmd.session_id).await?.is_some() {
            return Err(AdaptiveSessionError::AlreadyExists(cmd.session_id));
        }

        // 2. The analysis must be able to generate and resolve
        let theme = self
            .content
            .adaptive_theme(&cmd.analysis_id)
            .await?
            .ok_or_else(|| AdaptiveSessionError::AnalysisNotFound(cmd.analysis_id.clone()))?;
        if self.content.strategy_config(&cmd.analysis_id).await?.is_none() {
            return Err(AdaptiveSessionError::AnalysisNotFound(cmd.analysis_id));
        }

        // 3. Generate question 1
        let mut session = AdaptiveSession::start(
            cmd.session_id,
            cmd.analysis_id,
            cmd.gender,
            self.settings.total_questions,
        )?;
        let draft = self
            .generator
            .generate(&theme, &session, 1, cmd.gender, self.settings.context_answers)
            .await?;
        let question = session.issue_question(draft)?.clone();

        // 4. Persist session and question together
        self.sessions.save_new(&session).await.map_err(|e| {
            if e.code == ErrorCode::SessionAlreadyExists {
                AdaptiveSessionError::AlreadyExists(session.id())
            } else {
                e.into()
            }
        })?;

        tracing::info!(
            session_id = %session.id(),
            analysis_id = %session.analysis_id(),
            total_questions = session.total_questions(),
            "Adaptive session started"
        );

        Ok(StartSessionResult { session, question })
    }
}
