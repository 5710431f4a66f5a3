//! ComputeResultHandler - Scores and resolves a completed static quiz.

use std::collections::HashSet;
use std::sync::Arc;

use super::QuizError;
use crate::domain::foundation::{AnalysisId, Gender, SessionId};
use crate::domain::resolution::{QuizResult, ResultResolver};
use crate::domain::scoring::{AxisScorer, OptionSelection};
use crate::ports::{QuizContentStore, ResultRepository};

/// Command to compute the result of one static quiz session.
#[derive(Debug, Clone)]
pub struct ComputeResultCommand {
    pub session_id: SessionId,
    pub analysis_id: AnalysisId,
    pub gender: Gender,
    pub selections: Vec<OptionSelection>,
}

/// Result of result computation.
#[derive(Debug, Clone)]
pub struct ComputeResultResult {
    pub result: QuizResult,
    /// True when the session had already been resolved.
    pub already_existed: bool,
}

/// Handler for static quiz result computation.
pub struct ComputeResultHandler {
    content: Arc<dyn QuizContentStore>,
    results: Arc<dyn ResultRepository>,
}

impl ComputeResultHandler {
    pub fn new(content: Arc<dyn QuizContentStore>, results: Arc<dyn ResultRepository>) -> Self {
        Self { content, results }
    }

    pub async fn handle(&self, cmd: ComputeResultCommand) -> Result<ComputeResultResult, QuizError> {
        // 1. A session resolves once
        if let Some(existing) = self.results.find_by_session(&cmd.session_id).await? {
            return Ok(ComputeResultResult {
                result: existing,
                already_existed: true,
            });
        }

        // 2. Load the analysis
        let expected = self
            .content
            .question_count(&cmd.analysis_id)
            .await?
            .ok_or_else(|| QuizError::AnalysisNotFound(cmd.analysis_id.clone()))?;
        let strategy = self
            .content
            .strategy_config(&cmd.analysis_id)
            .await?
            .ok_or_else(|| QuizError::StrategyMissing(cmd.analysis_id.clone()))?;

        // 3. Validate the answer set
        if cmd.selections.len() != expected {
            return Err(QuizError::IncompleteAnswers {
                expected,
                actual: cmd.selections.len(),
            });
        }
        let mut seen = HashSet::with_capacity(cmd.selections.len());
        for selection in &cmd.selections {
            if !seen.insert(selection.question_id.as_str()) {
                return Err(QuizError::DuplicateQuestion(selection.question_id.clone()));
            }
        }

        // 4. Expand selections into axis answers
        let mut answers = Vec::new();
        for selection in &cmd.selections {
            let option = self
                .content
                .option_weights(&cmd.analysis_id, &selection.question_id, &selection.option_id)
                .await?
                .ok_or_else(|| QuizError::UnknownOption {
                    question_id: selection.question_id.clone(),
                    option_id: selection.option_id.clone(),
                })?;
            answers.extend(option.expand());
        }

        // 5. Score and resolve
        let scores = AxisScorer::score(&answers)?;
        let resolved = ResultResolver::resolve(&scores, &strategy, cmd.gender)?;
        let result = QuizResult::new(
            cmd.session_id,
            cmd.analysis_id,
            scores,
            resolved,
            cmd.gender,
        );

        // 6. Persist; a concurrent computation may have won
        let stored = self.results.save_if_absent(&result).await?;
        let already_existed = stored.id != result.id;

        tracing::info!(
            session_id = %stored.session_id,
            analysis_id = %stored.analysis_id,
            result_key = stored.result_key().unwrap_or("-"),
            already_existed,
            "Quiz result computed"
        );

        Ok(ComputeResultResult {
            result: stored,
            already_existed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::YamlQuizCatalog;
    use crate::adapters::memory::InMemoryQuizStore;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::resolution::{ResolutionDetail, StrategyKind};

    const CATALOG: &str = r#"
analyses:
  - id: mbti
    strategy:
      kind: binary_pairs
      axes:
        - { axis: "E/I", positive: E, negative: I }
        - { axis: "S/N", positive: S, negative: N }
        - { axis: "T/F", positive: T, negative: F }
        - { axis: "J/P", positive: J, negative: P }
      titles:
        female:
          E-N-F-J: The Protagonist
    questions:
      - id: q1
        options:
          - { id: a, weights: [{ axis: "E/I", weight: 1.0 }] }
          - { id: b, weights: [{ axis: "E/I", weight: -1.0 }] }
      - id: q2
        options:
          - { id: a, weights: [{ axis: "S/N", weight: 1.0 }] }
          - { id: b, weights: [{ axis: "S/N", weight: -1.0 }, { axis: "T/F", weight: -0.5 }] }
      - id: q3
        options:
          - { id: a, weights: [{ axis: "J/P", weight: 1.0 }] }
          - { id: b, weights: [{ axis: "J/P", weight: -1.0 }] }
  - id: no-strategy
    question_count: 1
"#;

    fn setup() -> (ComputeResultHandler, Arc<InMemoryQuizStore>) {
        let store = Arc::new(InMemoryQuizStore::new());
        let catalog = Arc::new(YamlQuizCatalog::from_yaml_str(CATALOG).unwrap());
        (ComputeResultHandler::new(catalog, store.clone()), store)
    }

    fn command(picks: &[(&str, &str)]) -> ComputeResultCommand {
        ComputeResultCommand {
            session_id: SessionId::new(),
            analysis_id: AnalysisId::new("mbti").unwrap(),
            gender: Gender::Female,
            selections: picks
                .iter()
                .map(|(q, o)| OptionSelection::new(*q, *o))
                .collect(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Success cases
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn resolves_multi_axis_options() {
        let (handler, store) = setup();

        let out = handler
            .handle(command(&[("q1", "a"), ("q2", "b"), ("q3", "a")]))
            .await
            .unwrap();

        assert!(!out.already_existed);
        assert_eq!(out.result.result_key(), Some("E-N-F-J"));
        assert_eq!(out.result.title(), "The Protagonist");
        assert_eq!(out.result.scores.get("T/F"), Some(-0.5));
        assert_eq!(out.result.resolved.strategy_kind, StrategyKind::BinaryPairs);
        assert!(matches!(out.result.resolved.detail, ResolutionDetail::Poles { .. }));
        assert_eq!(store.result_count().await, 1);
    }

    #[tokio::test]
    async fn recomputation_returns_stored_result() {
        let (handler, store) = setup();
        let cmd = command(&[("q1", "a"), ("q2", "b"), ("q3", "a")]);

        let first = handler.handle(cmd.clone()).await.unwrap();
        let mut again = cmd;
        again.selections = vec![
            OptionSelection::new("q1", "b"),
            OptionSelection::new("q2", "a"),
            OptionSelection::new("q3", "b"),
        ];
        let second = handler.handle(again).await.unwrap();

        assert!(second.already_existed);
        assert_eq!(second.result, first.result);
        assert_eq!(store.result_count().await, 1);
    }

    // ───────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn rejects_wrong_answer_count() {
        let (handler, _) = setup();

        let err = handler
            .handle(command(&[("q1", "a"), ("q2", "b")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuizError::IncompleteAnswers {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn rejects_duplicate_question() {
        let (handler, _) = setup();

        let err = handler
            .handle(command(&[("q1", "a"), ("q1", "b"), ("q3", "a")]))
            .await
            .unwrap_err();

        assert!(matches!(err, QuizError::DuplicateQuestion(q) if q == "q1"));
    }

    #[tokio::test]
    async fn rejects_unknown_option() {
        let (handler, store) = setup();

        let err = handler
            .handle(command(&[("q1", "a"), ("q2", "z"), ("q3", "a")]))
            .await
            .unwrap_err();

        assert!(matches!(err, QuizError::UnknownOption { .. }));
        assert_eq!(store.result_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_analysis_is_not_found() {
        let (handler, _) = setup();
        let mut cmd = command(&[("q1", "a")]);
        cmd.analysis_id = AnalysisId::new("nope").unwrap();

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::AnalysisNotFound);
    }

    #[tokio::test]
    async fn analysis_without_strategy_is_rejected() {
        let (handler, _) = setup();
        let mut cmd = command(&[("q1", "a")]);
        cmd.analysis_id = AnalysisId::new("no-strategy").unwrap();

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, QuizError::StrategyMissing(_)));
    }
}
