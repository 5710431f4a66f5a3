//! End-to-end adaptive session runs against the in-memory store.

use std::sync::Arc;

use persona_lens::adapters::ai::{MockAIProvider, MockError, MockResponse};
use persona_lens::adapters::catalog::YamlQuizCatalog;
use persona_lens::adapters::memory::InMemoryQuizStore;
use persona_lens::application::{
    AdaptiveSettings, AssemblerConfig, InterpretationAssembler, QuestionGenerator, SessionLocks,
    StartSessionCommand, StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler,
    SubmitAnswerResult,
};
use persona_lens::domain::adaptive::{AdaptiveSessionError, AdaptiveSessionStatus, SessionPhase};
use persona_lens::domain::foundation::{AnalysisId, Gender, QuestionId, SessionId};
use persona_lens::ports::{AdaptiveSessionRepository, CompletionRequest, ResultRepository};

const CATALOG: &str = r#"
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
        female:
          RF-TT-FL: Quiet Harbor
    result_types:
      - key: RF-TT-FL
        gender: female
        title: Quiet Harbor
        sections:
          Strengths: Steady under pressure.
          Personality Traits: Calm and observant.
    adaptive_theme:
      name: Egen/Teto analysis
      system_prompt: You write short two-option questions about daily life.
      axes:
        - { axis: AC_RF, first_option_leaning: active, second_option_leaning: reflective }
        - { axis: EG_TT, first_option_leaning: egen, second_option_leaning: teto }
        - { axis: EX_IN, first_option_leaning: expressive, second_option_leaning: inward }
        - { axis: PL_FL, first_option_leaning: planned, second_option_leaning: flexible }
"#;

const AXES: [&str; 4] = ["AC_RF", "EG_TT", "EX_IN", "PL_FL"];

struct App {
    start: StartSessionHandler,
    submit: SubmitAnswerHandler,
    store: Arc<InMemoryQuizStore>,
    provider: MockAIProvider,
}

fn question_number(request: &CompletionRequest) -> usize {
    request
        .last_user_message()
        .and_then(|p| p.strip_prefix("Write question "))
        .and_then(|p| p.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

fn app() -> App {
    let provider = MockAIProvider::new().with_responder(|req: &CompletionRequest| {
        let n = question_number(req);
        Some(MockResponse::success(format!(
            r#"{{"question_text": "Scene {n}?", "option_1": "Lead", "option_2": "Wait", "category": "{}"}}"#,
            AXES[(n - 1) % AXES.len()]
        )))
    });
    let store = Arc::new(InMemoryQuizStore::new());
    let catalog = Arc::new(YamlQuizCatalog::from_yaml_str(CATALOG).unwrap());
    let generator = Arc::new(QuestionGenerator::new(Arc::new(provider.clone())));
    let locks = Arc::new(SessionLocks::new());
    let settings = AdaptiveSettings::default();
    let assembler = Arc::new(InterpretationAssembler::new(
        catalog.clone(),
        None,
        AssemblerConfig::default(),
    ));

    App {
        start: StartSessionHandler::new(
            store.clone(),
            catalog.clone(),
            generator.clone(),
            locks.clone(),
            settings.clone(),
        ),
        submit: SubmitAnswerHandler::new(store.clone(), catalog, generator, locks, settings)
            .with_assembler(assembler),
        store,
        provider,
    }
}

async fn start(app: &App) -> (SessionId, QuestionId) {
    let out = app
        .start
        .handle(StartSessionCommand {
            session_id: SessionId::new(),
            analysis_id: AnalysisId::new("ai-egen-analysis").unwrap(),
            gender: Gender::Female,
        })
        .await
        .unwrap();
    assert_eq!(out.question.index, 1);
    (out.session.id(), out.question.id)
}

fn submit(session_id: SessionId, question_id: QuestionId, answer: u8) -> SubmitAnswerCommand {
    SubmitAnswerCommand {
        session_id,
        question_id,
        answer,
        gender: Gender::Female,
    }
}

/// Answers `count` questions with option 2, returning the next outstanding id.
async fn answer_many(app: &App, session_id: SessionId, mut question_id: QuestionId, count: usize) -> QuestionId {
    for _ in 0..count {
        match app.submit.handle(submit(session_id, question_id, 2)).await.unwrap() {
            SubmitAnswerResult::NextQuestion { question, .. } => question_id = question.id,
            SubmitAnswerResult::Completed { .. } => break,
        }
    }
    question_id
}

#[tokio::test]
async fn twelve_answers_complete_the_session() {
    let app = app();
    let (sid, qid) = start(&app).await;

    let last = answer_many(&app, sid, qid, 11).await;
    let out = app.submit.handle(submit(sid, last, 2)).await.unwrap();

    let SubmitAnswerResult::Completed {
        session,
        result,
        interpretation,
    } = out
    else {
        panic!("expected completion after the twelfth answer");
    };
    assert_eq!(session.status(), AdaptiveSessionStatus::Completed);
    assert_eq!(session.questions().len(), 12);
    assert!(session.questions().iter().all(|q| q.is_answered()));
    assert_eq!(result.result_key(), Some("RF-TT-FL"));
    assert_eq!(result.title(), "Quiet Harbor");
    assert!(interpretation.is_some());

    let stored = app.store.find_by_session(&sid).await.unwrap().unwrap();
    assert_eq!(stored.id, result.id);

    let err = app
        .submit
        .handle(submit(sid, QuestionId::new(), 1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AdaptiveSessionError::NotInProgress(AdaptiveSessionStatus::Completed)
    );
}

#[tokio::test]
async fn answer_to_a_previous_question_is_rejected() {
    let app = app();
    let (sid, first) = start(&app).await;
    let second = answer_many(&app, sid, first, 1).await;

    let err = app.submit.handle(submit(sid, first, 1)).await.unwrap_err();
    assert_eq!(err, AdaptiveSessionError::AlreadyAnswered(first));

    let stranger = QuestionId::new();
    let err = app.submit.handle(submit(sid, stranger, 1)).await.unwrap_err();
    assert_eq!(err, AdaptiveSessionError::QuestionNotOutstanding(stranger));

    let session = app.store.find_by_id(&sid).await.unwrap().unwrap();
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.outstanding_question().map(|q| q.id), Some(second));
}

#[tokio::test]
async fn provider_failure_keeps_prior_answers_and_allows_retry() {
    let app = app();
    let (sid, qid) = start(&app).await;
    let fifth = answer_many(&app, sid, qid, 4).await;
    let before = app.store.find_by_id(&sid).await.unwrap().unwrap();

    // Answering question 5 generates question 6. That generation fails and
    // the whole step rolls back, so four answers stay recorded and question 5
    // is still outstanding.
    app.provider.push_error(MockError::Unavailable {
        message: "upstream down".to_string(),
    });
    let err = app.submit.handle(submit(sid, fifth, 1)).await.unwrap_err();
    assert!(matches!(err, AdaptiveSessionError::Generation(_)));

    let session = app.store.find_by_id(&sid).await.unwrap().unwrap();
    assert_eq!(session.current_index(), 4);
    assert_eq!(session.phase(), SessionPhase::AwaitingAnswer { index: 5 });
    assert_eq!(session.questions().iter().filter(|q| q.is_answered()).count(), 4);
    assert_eq!(session.questions()[..4], before.questions()[..4]);
    assert_eq!(session.outstanding_question().map(|q| q.id), Some(fifth));

    let out = app.submit.handle(submit(sid, fifth, 1)).await.unwrap();
    let SubmitAnswerResult::NextQuestion { session, question } = out else {
        panic!("expected the sixth question");
    };
    assert_eq!(question.index, 6);
    assert_eq!(session.current_index(), 5);
    assert_eq!(app.store.result_count().await, 0);
}
