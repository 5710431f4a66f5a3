//! Fixtures shared by adaptive handler tests.

use std::sync::Arc;

use crate::adapters::ai::{MockAIProvider, MockResponse};
use crate::adapters::catalog::YamlQuizCatalog;
use crate::adapters::memory::InMemoryQuizStore;
use crate::domain::foundation::AnalysisId;
use crate::ports::CompletionRequest;

pub const CATALOG: &str = r#"
analyses:
  - id: ai-egen-analysis
    strategy:
      kind: custom
      axes:
        - { axis: AC_RF, positive: AC, negative: RF }
        - { axis: EG_TT, positive: EG, negative: TT }
        - { axis: EX_IN, positive: EX, negative: IN }
        - { axis: PL_FL, positive: PL, negative: FL }
      titles:
        male:
          AC-EG-PL: Sunlit Commander
    result_types:
      - key: AC-EG-PL
        gender: male
        title: Sunlit Commander
        sections:
          Strengths: Leads from the front.
          Personality Traits: Restless and warm.
    adaptive_theme:
      name: Egen/Teto analysis
      system_prompt: You write playful two-option questions.
      axes:
        - { axis: AC_RF, first_option_leaning: active, second_option_leaning: reflective }
        - { axis: EG_TT, first_option_leaning: egen, second_option_leaning: teto }
        - { axis: EX_IN, first_option_leaning: expressive, second_option_leaning: inward }
        - { axis: PL_FL, first_option_leaning: planned, second_option_leaning: flexible }
  - id: no-theme
    strategy:
      kind: continuous
"#;

const AXES: [&str; 4] = ["AC_RF", "EG_TT", "EX_IN", "PL_FL"];

pub fn analysis() -> AnalysisId {
    AnalysisId::new("ai-egen-analysis").unwrap()
}

pub fn catalog() -> Arc<YamlQuizCatalog> {
    Arc::new(YamlQuizCatalog::from_yaml_str(CATALOG).unwrap())
}

pub fn store() -> Arc<InMemoryQuizStore> {
    Arc::new(InMemoryQuizStore::new())
}

/// Draft JSON for question `n`, probing the axes in rotation.
pub fn draft_json(n: usize) -> String {
    format!(
        r#"{{"question_text": "Situation {n}?", "option_1": "Go", "option_2": "Stay", "hint": "pick fast", "category": "{}"}}"#,
        AXES[(n - 1) % AXES.len()]
    )
}

/// Provider answering every question request with a valid draft.
pub fn question_provider() -> MockAIProvider {
    MockAIProvider::new().with_responder(|req: &CompletionRequest| {
        let n = req
            .last_user_message()
            .and_then(|p| p.strip_prefix("Write question "))
            .and_then(|p| p.split_whitespace().next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(1);
        Some(MockResponse::success(draft_json(n)))
    })
}
