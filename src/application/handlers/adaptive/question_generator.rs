//! Generates the next adaptive question through the AI provider.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::adaptive::{AdaptiveSession, AdaptiveSessionError, AdaptiveTheme, QuestionDraft};
use crate::domain::foundation::Gender;
use crate::domain::generation::ReplyParser;
use crate::ports::{AIProvider, CompletionRequest, GenerationPurpose, MessageRole, RequestMetadata};

/// Asks the provider for one question and validates the reply.
pub struct QuestionGenerator {
    ai_provider: Arc<dyn AIProvider>,
    parser: ReplyParser,
}

impl QuestionGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            parser: ReplyParser::new(),
        }
    }

    /// Generates question `index` of `session`, given its last
    /// `context_answers` answers.
    ///
    /// # Errors
    ///
    /// `Generation` on provider failure, unparseable reply, or a draft
    /// that fails validation against the theme's axes.
    pub async fn generate(
        &self,
        theme: &AdaptiveTheme,
        session: &AdaptiveSession,
        index: u32,
        gender: Gender,
        context_answers: usize,
    ) -> Result<QuestionDraft, AdaptiveSessionError> {
        let recent = session.recent_answers(context_answers);
        let prompt = theme.question_prompt(index, session.total_questions(), gender, &recent);

        let metadata = RequestMetadata::new(
            GenerationPurpose::AdaptiveQuestion,
            session.analysis_id().clone(),
            Uuid::new_v4().to_string(),
        )
        .with_session(session.id());
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(theme.system_prompt.clone())
            .with_message(MessageRole::User, prompt)
            .with_temperature(theme.temperature)
            .with_max_tokens(theme.max_tokens)
            .with_json_response();

        let response = self.ai_provider.complete(request).await.map_err(|e| {
            tracing::warn!(
                session_id = %session.id(),
                index,
                error = %e,
                retryable = e.is_retryable(),
                "Question generation failed"
            );
            AdaptiveSessionError::generation(e.to_string())
        })?;

        let draft: QuestionDraft = self
            .parser
            .parse_json(&response.content)
            .map_err(|e| AdaptiveSessionError::generation(e.to_string()))?;

        draft.validate(&theme.axis_ids()).map_err(|e| {
            tracing::warn!(
                session_id = %session.id(),
                index,
                error = %e,
                "Generated question rejected"
            );
            AdaptiveSessionError::generation(e.to_string())
        })
    }
}
