//! InterpretationAssembler - Builds the ordered interpretation of a result.
//!
//! Stored sections are loaded, ordered by their vocabulary and optionally
//! personalized through the AI provider. Personalization is best effort:
//! any provider error, malformed reply or guard rejection keeps the stored
//! text for that section and logs a warning.

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::foundation::{AnalysisId, Gender};
use crate::domain::generation::ReplyParser;
use crate::domain::interpretation::prompts::{
    batch_prompt, section_prompt, PromptContext, BATCH_SYSTEM_PROMPT, SECTION_SYSTEM_PROMPT,
};
use crate::domain::interpretation::{
    AnswerPattern, AssembledInterpretation, AssembledSection, DirectionGuard, Interpretation,
    InterpretationError, PersonalizationMode, ResultTypeDefinition, SectionOrder, SectionSource,
};
use crate::ports::{
    AIProvider, CompletionRequest, GenerationPurpose, MessageRole, QuizContentStore,
    RequestMetadata,
};

/// Request to assemble one result type's interpretation.
#[derive(Debug, Clone)]
pub struct AssembleRequest {
    pub analysis_id: AnalysisId,
    pub result_key: String,
    pub gender: Gender,
    pub personalization: PersonalizationMode,
    pub pattern: AnswerPattern,
}

/// Tuning for personalization calls.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Reject rewrites that drift to another result type.
    pub direction_guard: bool,
    pub temperature: f32,
    pub section_max_tokens: u32,
    pub batch_max_tokens: u32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            direction_guard: true,
            temperature: 0.7,
            section_max_tokens: 400,
            batch_max_tokens: 2000,
        }
    }
}

/// Assembles stored, optionally personalized interpretations.
pub struct InterpretationAssembler {
    content: Arc<dyn QuizContentStore>,
    ai_provider: Option<Arc<dyn AIProvider>>,
    parser: ReplyParser,
    config: AssemblerConfig,
}

impl InterpretationAssembler {
    pub fn new(
        content: Arc<dyn QuizContentStore>,
        ai_provider: Option<Arc<dyn AIProvider>>,
        config: AssemblerConfig,
    ) -> Self {
        Self {
            content,
            ai_provider,
            parser: ReplyParser::new(),
            config,
        }
    }

    /// Assembles the interpretation for (analysis, result key, gender).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the catalog has no such result type
    /// - `Store` on content store failure
    pub async fn assemble(
        &self,
        req: AssembleRequest,
    ) -> Result<AssembledInterpretation, InterpretationError> {
        let definition = self
            .content
            .find_result_type(&req.analysis_id, &req.result_key, req.gender)
            .await?
            .ok_or_else(|| InterpretationError::NotFound {
                analysis_id: req.analysis_id.clone(),
                result_key: req.result_key.clone(),
                gender: req.gender,
            })?;

        let mut stored = self.content.interpretations(&definition.id).await?;
        let vocabulary = SectionOrder::sort_by_section(&mut stored, |i| i.section.as_str());

        let rewrites = match (req.personalization, &self.ai_provider) {
            (PersonalizationMode::None, _) => vec![None; stored.len()],
            (_, _) if stored.is_empty() => Vec::new(),
            (mode, None) => {
                tracing::warn!(
                    analysis_id = %req.analysis_id,
                    result_key = %req.result_key,
                    mode = ?mode,
                    "Personalization requested without an AI provider, using stored text"
                );
                vec![None; stored.len()]
            }
            (mode, Some(provider)) => {
                let guard = self.guard_for(&definition).await?;
                let ctx = PromptContext {
                    result_key: &definition.result_key,
                    title: &definition.title,
                    gender: req.gender,
                    pattern: &req.pattern,
                };
                match mode {
                    PersonalizationMode::PerSection => {
                        self.personalize_each(provider.as_ref(), &ctx, &guard, &definition, &stored)
                            .await
                    }
                    _ => {
                        self.personalize_batch(provider.as_ref(), &ctx, &guard, &definition, &stored)
                            .await
                    }
                }
            }
        };

        let sections = stored
            .into_iter()
            .zip(rewrites.into_iter().chain(std::iter::repeat(None)))
            .map(|(interpretation, rewrite)| match rewrite {
                Some(text) => AssembledSection {
                    section: interpretation.section,
                    text,
                    source: SectionSource::Personalized,
                },
                None => AssembledSection {
                    section: interpretation.section,
                    text: interpretation.content,
                    source: SectionSource::Stored,
                },
            })
            .collect();

        Ok(AssembledInterpretation {
            analysis_id: definition.analysis_id,
            result_key: definition.result_key,
            gender: definition.gender,
            title: definition.title,
            subtitle: definition.subtitle,
            vocabulary,
            sections,
        })
    }

    async fn guard_for(
        &self,
        definition: &ResultTypeDefinition,
    ) -> Result<DirectionGuard, InterpretationError> {
        if !self.config.direction_guard {
            return Ok(DirectionGuard::permissive(&definition.title));
        }
        let rivals = self
            .content
            .result_types(&definition.analysis_id, definition.gender)
            .await?
            .into_iter()
            .filter(|rt| rt.id != definition.id)
            .map(|rt| rt.title);
        Ok(DirectionGuard::new(&definition.title, rivals))
    }

    fn request(
        &self,
        purpose: GenerationPurpose,
        definition: &ResultTypeDefinition,
        system_prompt: &str,
        prompt: String,
        max_tokens: u32,
    ) -> CompletionRequest {
        let metadata = RequestMetadata::new(
            purpose,
            definition.analysis_id.clone(),
            Uuid::new_v4().to_string(),
        );
        CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, prompt)
            .with_temperature(self.config.temperature)
            .with_max_tokens(max_tokens)
    }

    /// One concurrent call per section.
    async fn personalize_each(
        &self,
        provider: &dyn AIProvider,
        ctx: &PromptContext<'_>,
        guard: &DirectionGuard,
        definition: &ResultTypeDefinition,
        stored: &[Interpretation],
    ) -> Vec<Option<String>> {
        let calls = stored.iter().map(|interpretation| async move {
            let request = self.request(
                GenerationPurpose::SectionRewrite,
                definition,
                SECTION_SYSTEM_PROMPT,
                section_prompt(ctx, &interpretation.section, &interpretation.content),
                self.config.section_max_tokens,
            );
            let outcome = match provider.complete(request).await {
                Ok(response) => self
                    .parser
                    .sanitize(&response.content)
                    .map_err(|e| e.to_string())
                    .and_then(|text| guard.check(&text).map(|_| text).map_err(|e| e.to_string())),
                Err(e) => Err(e.to_string()),
            };
            match outcome {
                Ok(text) => Some(text),
                Err(reason) => {
                    warn_fallback(definition, &interpretation.section, &reason);
                    None
                }
            }
        });
        join_all(calls).await
    }

    /// One call returning a JSON object keyed by section.
    async fn personalize_batch(
        &self,
        provider: &dyn AIProvider,
        ctx: &PromptContext<'_>,
        guard: &DirectionGuard,
        definition: &ResultTypeDefinition,
        stored: &[Interpretation],
    ) -> Vec<Option<String>> {
        let pairs: Vec<(&str, &str)> = stored
            .iter()
            .map(|i| (i.section.as_str(), i.content.as_str()))
            .collect();
        let request = self
            .request(
                GenerationPurpose::BatchRewrite,
                definition,
                BATCH_SYSTEM_PROMPT,
                batch_prompt(ctx, &pairs),
                self.config.batch_max_tokens,
            )
            .with_json_response();

        let reply: Result<HashMap<String, String>, String> = match provider.complete(request).await
        {
            Ok(response) => self
                .parser
                .parse_json(&response.content)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let mut rewritten = match reply {
            Ok(map) => map,
            Err(reason) => {
                warn_fallback(definition, "*", &reason);
                return vec![None; stored.len()];
            }
        };

        stored
            .iter()
            .map(|interpretation| {
                let section = interpretation.section.as_str();
                let Some(text) = rewritten.remove(section) else {
                    warn_fallback(definition, section, "section missing from batched reply");
                    return None;
                };
                let text = text.trim().to_string();
                match guard.check(&text) {
                    Ok(()) => Some(text),
                    Err(rejection) => {
                        warn_fallback(definition, section, &rejection.to_string());
                        None
                    }
                }
            })
            .collect()
    }
}

fn warn_fallback(definition: &ResultTypeDefinition, section: &str, reason: &str) {
    tracing::warn!(
        analysis_id = %definition.analysis_id,
        result_key = %definition.result_key,
        section = section,
        reason = reason,
        "Personalization failed, using stored text"
    );
}
