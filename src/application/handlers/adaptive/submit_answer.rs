//! SubmitAnswerHandler - Records an answer and advances the session.
//!
//! A step is all or nothing: the answer is persisted together with either
//! the next question or the completed session and its result. When
//! generation fails the stored session is left exactly as it was, so the
//! same submission can be retried.

use std::sync::Arc;

use super::{AdaptiveSettings, QuestionGenerator, SessionLocks};
use crate::application::handlers::interpretation::{AssembleRequest, InterpretationAssembler};
use crate::domain::adaptive::{
    AdaptiveSession, AdaptiveSessionError, AnswerOutcome, GeneratedQuestion,
};
use crate::domain::foundation::{Choice, Gender, QuestionId, SessionId};
use crate::domain::interpretation::{AssembledInterpretation, InterpretationError};
use crate::domain::resolution::{QuizResult, ResultResolver};
use crate::domain::scoring::{AxisScoreMap, AxisScorer};
use crate::ports::{AdaptiveSessionRepository, QuizContentStore};

/// Command to answer the outstanding question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    /// 1 or 2.
    pub answer: u8,
    /// Used for the next question and for resolution.
    pub gender: Gender,
}

/// Outcome of an accepted answer.
#[derive(Debug, Clone)]
pub enum SubmitAnswerResult {
    NextQuestion {
        session: AdaptiveSession,
        question: GeneratedQuestion,
    },
    Completed {
        session: AdaptiveSession,
        result: QuizResult,
        /// Stored interpretation of the result, when the catalog has one.
        interpretation: Option<AssembledInterpretation>,
    },
}

impl SubmitAnswerResult {
    pub fn session(&self) -> &AdaptiveSession {
        match self {
            SubmitAnswerResult::NextQuestion { session, .. }
            | SubmitAnswerResult::Completed { session, .. } => session,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitAnswerResult::Completed { .. })
    }
}

/// Handler for adaptive answers.
pub struct SubmitAnswerHandler {
    sessions: Arc<dyn AdaptiveSessionRepository>,
    content: Arc<dyn QuizContentStore>,
    generator: Arc<QuestionGenerator>,
    assembler: Option<Arc<InterpretationAssembler>>,
    locks: Arc<SessionLocks>,
    settings: AdaptiveSettings,
}

impl SubmitAnswerHandler {
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
            assembler: None,
            locks,
            settings,
        }
    }

    /// Assembles the result's interpretation on completion.
    pub fn with_assembler(mut self, assembler: Arc<InterpretationAssembler>) -> Self {
        self.assembler = Some(assembler);
        self
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, AdaptiveSessionError> {
        let choice = Choice::try_from(cmd.answer)
            .map_err(|e| AdaptiveSessionError::validation("answer", e.to_string()))?;

        let _guard = self.locks.acquire(cmd.session_id).await;

        // 1. Load and record
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(AdaptiveSessionError::NotFound(cmd.session_id))?;
        let outcome = session.record_answer(cmd.question_id, choice)?;

        tracing::debug!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            answer = choice.as_number(),
            "Answer recorded"
        );

        // 2. Advance
        match outcome {
            AnswerOutcome::NextQuestion { index } => {
                let question = self.next_question(&mut session, index, cmd.gender).await?;
                self.sessions.update(&session).await?;
                Ok(SubmitAnswerResult::NextQuestion { session, question })
            }
            AnswerOutcome::ReadyToComplete => {
                let result = self.resolve(&session, cmd.gender).await?;
                session.complete(result.id)?;
                self.sessions.complete(&session, &result).await?;

                tracing::info!(
                    session_id = %session.id(),
                    analysis_id = %session.analysis_id(),
                    result_key = result.result_key().unwrap_or("-"),
                    "Adaptive session completed"
                );

                let interpretation = self.interpret(&session, &result).await;
                Ok(SubmitAnswerResult::Completed {
                    session,
                    result,
                    interpretation,
                })
            }
        }
    }

    async fn next_question(
        &self,
        session: &mut AdaptiveSession,
        index: u32,
        gender: Gender,
    ) -> Result<GeneratedQuestion, AdaptiveSessionError> {
        let theme = self
            .content
            .adaptive_theme(session.analysis_id())
            .await?
            .ok_or_else(|| AdaptiveSessionError::AnalysisNotFound(session.analysis_id().clone()))?;
        let draft = self
            .generator
            .generate(&theme, session, index, gender, self.settings.context_answers)
            .await?;
        Ok(session.issue_question(draft)?.clone())
    }

    async fn resolve(
        &self,
        session: &AdaptiveSession,
        gender: Gender,
    ) -> Result<QuizResult, AdaptiveSessionError> {
        let strategy = self
            .content
            .strategy_config(session.analysis_id())
            .await?
            .ok_or_else(|| AdaptiveSessionError::AnalysisNotFound(session.analysis_id().clone()))?;

        let answers = session.axis_answers();
        // Uncategorized answers only: every axis scores 0.
        let scores = if answers.is_empty() {
            AxisScoreMap::new()
        } else {
            AxisScorer::score(&answers)
                .map_err(|e| AdaptiveSessionError::validation("answers", e.to_string()))?
        };
        let resolved = ResultResolver::resolve(&scores, &strategy, gender)
            .map_err(|e| AdaptiveSessionError::validation("strategy", e.to_string()))?;

        Ok(QuizResult::new(
            session.id(),
            session.analysis_id().clone(),
            scores,
            resolved,
            gender,
        ))
    }

    /// Interpretation is a best-effort addition to a completed session.
    async fn interpret(
        &self,
        session: &AdaptiveSession,
        result: &QuizResult,
    ) -> Option<AssembledInterpretation> {
        let assembler = self.assembler.as_ref()?;
        let result_key = result.result_key()?;

        let request = AssembleRequest {
            analysis_id: result.analysis_id.clone(),
            result_key: result_key.to_string(),
            gender: result.gender,
            personalization: self.settings.personalization,
            pattern: session.answer_pattern(),
        };
        match assembler.assemble(request).await {
            Ok(assembled) => Some(assembled),
            Err(InterpretationError::NotFound { .. }) => None,
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error = %e,
                    "Interpretation unavailable for completed session"
                );
                None
            }
        }
    }
}
