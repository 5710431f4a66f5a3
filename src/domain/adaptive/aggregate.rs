//! AdaptiveSession aggregate.
//!
//! An adaptive session walks through a fixed number of generated questions.
//! Exactly one question is outstanding at a time; answering the last one
//! makes the session ready to complete.
//!
//! # Design Decisions
//!
//! - **Answers live on questions**: each question carries its single answer,
//!   so the answer log is the answered questions in index order
//! - **Whole-aggregate saves**: every mutation is persisted as one unit, so
//!   a failed step leaves the stored session untouched

use crate::domain::foundation::{
    AnalysisId, Choice, Gender, QuestionId, ResultId, SessionId, StateMachine, Timestamp,
};
use crate::domain::interpretation::AnswerPattern;
use crate::domain::scoring::Answer;

use super::{
    AdaptiveSessionError, AdaptiveSessionStatus, AnswerContext, GeneratedQuestion, QuestionDraft,
    SessionPhase,
};

/// Default number of questions in an adaptive session.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 12;

/// What the engine must do after an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Generate question `index` next.
    NextQuestion { index: u32 },
    /// Every question is answered; compute the result.
    ReadyToComplete,
}

/// The AdaptiveSession aggregate root.
///
/// # Invariants
///
/// - Question indices are 1..=n with no gaps
/// - At most one unanswered question, always the last one
/// - `questions.len() <= total_questions`
/// - Status only moves InProgress -> Completed | Abandoned
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveSession {
    id: SessionId,
    analysis_id: AnalysisId,
    gender: Gender,
    status: AdaptiveSessionStatus,
    total_questions: u32,
    questions: Vec<GeneratedQuestion>,
    result_id: Option<ResultId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AdaptiveSession {
    /// Creates a new in-progress session with no questions.
    pub fn start(
        id: SessionId,
        analysis_id: AnalysisId,
        gender: Gender,
        total_questions: u32,
    ) -> Result<Self, AdaptiveSessionError> {
        if total_questions == 0 {
            return Err(AdaptiveSessionError::validation(
                "total_questions",
                "must be at least 1",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            analysis_id,
            gender,
            status: AdaptiveSessionStatus::InProgress,
            total_questions,
            questions: Vec::new(),
            result_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a session from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        analysis_id: AnalysisId,
        gender: Gender,
        status: AdaptiveSessionStatus,
        total_questions: u32,
        mut questions: Vec<GeneratedQuestion>,
        result_id: Option<ResultId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        questions.sort_by_key(|q| q.index);
        Self {
            id,
            analysis_id,
            gender,
            status,
            total_questions,
            questions,
            result_id,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn analysis_id(&self) -> &AnalysisId {
        &self.analysis_id
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn status(&self) -> AdaptiveSessionStatus {
        self.status
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Questions in index order.
    pub fn questions(&self) -> &[GeneratedQuestion] {
        &self.questions
    }

    pub fn result_id(&self) -> Option<ResultId> {
        self.result_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Number of accepted answers.
    pub fn current_index(&self) -> u32 {
        self.questions.iter().filter(|q| q.is_answered()).count() as u32
    }

    /// The issued, unanswered question, if any.
    pub fn outstanding_question(&self) -> Option<&GeneratedQuestion> {
        if self.status != AdaptiveSessionStatus::InProgress {
            return None;
        }
        self.questions.last().filter(|q| !q.is_answered())
    }

    pub fn phase(&self) -> SessionPhase {
        match self.status {
            AdaptiveSessionStatus::Completed => SessionPhase::Completed,
            AdaptiveSessionStatus::Abandoned => SessionPhase::Abandoned,
            AdaptiveSessionStatus::InProgress => match self.outstanding_question() {
                Some(q) => SessionPhase::AwaitingAnswer { index: q.index },
                None if self.questions.is_empty() => SessionPhase::Created,
                None if self.current_index() >= self.total_questions => {
                    SessionPhase::ReadyToComplete
                }
                // Answered but the next question is not issued yet.
                None => SessionPhase::Created,
            },
        }
    }

    /// True if in progress and untouched since `cutoff`.
    pub fn is_stale(&self, cutoff: Timestamp) -> bool {
        self.status == AdaptiveSessionStatus::InProgress && self.updated_at.is_before(&cutoff)
    }

    // ───────────────────────────────────────────────────────────────
    // Answer Views
    // ───────────────────────────────────────────────────────────────

    /// Choices in answer order.
    pub fn choices(&self) -> Vec<Choice> {
        self.questions.iter().filter_map(|q| q.answer).collect()
    }

    pub fn answer_pattern(&self) -> AnswerPattern {
        AnswerPattern::from_choices(&self.choices())
    }

    /// The last `n` answers, oldest first.
    pub fn recent_answers(&self, n: usize) -> Vec<AnswerContext> {
        let answered: Vec<&GeneratedQuestion> =
            self.questions.iter().filter(|q| q.is_answered()).collect();
        let skip = answered.len().saturating_sub(n);
        answered
            .into_iter()
            .skip(skip)
            .filter_map(|q| {
                Some(AnswerContext {
                    index: q.index,
                    question: q.text.clone(),
                    chosen: q.chosen_option()?.to_string(),
                    choice: q.answer?,
                    category: q.category.clone(),
                })
            })
            .collect()
    }

    /// Answers expressed as axis contributions.
    ///
    /// The question's category is the axis; option 1 weighs +1 and
    /// option 2 weighs -1. Uncategorized questions contribute nothing.
    pub fn axis_answers(&self) -> Vec<Answer> {
        self.questions
            .iter()
            .filter_map(|q| {
                let choice = q.answer?;
                let axis = q.category.as_ref()?;
                Some(Answer::new(
                    q.id.to_string(),
                    format!("option_{}", choice.as_number()),
                    axis.clone(),
                    choice.axis_weight(),
                ))
            })
            .collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Appends the next question.
    ///
    /// # Errors
    ///
    /// - `NotInProgress` if completed or abandoned
    /// - `InvalidState` if a question is outstanding or all are issued
    pub fn issue_question(
        &mut self,
        draft: QuestionDraft,
    ) -> Result<&GeneratedQuestion, AdaptiveSessionError> {
        self.ensure_in_progress()?;
        if self.outstanding_question().is_some() {
            return Err(AdaptiveSessionError::invalid_state(
                "a question is already outstanding",
            ));
        }
        let index = self.questions.len() as u32 + 1;
        if index > self.total_questions {
            return Err(AdaptiveSessionError::invalid_state(
                "all questions have been issued",
            ));
        }

        let now = Timestamp::now();
        self.questions.push(GeneratedQuestion {
            id: QuestionId::new(),
            session_id: self.id,
            index,
            text: draft.question_text,
            option_1: draft.option_1,
            option_2: draft.option_2,
            hint: draft.hint,
            category: draft.category,
            answer: None,
            answered_at: None,
            created_at: now,
        });
        self.updated_at = now;

        let issued = self.questions.len() - 1;
        Ok(&self.questions[issued])
    }

    /// Records the answer to the outstanding question.
    ///
    /// # Errors
    ///
    /// - `NotInProgress` if completed or abandoned
    /// - `AlreadyAnswered` if the question has an answer
    /// - `QuestionNotOutstanding` if the id is not the outstanding question
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        choice: Choice,
    ) -> Result<AnswerOutcome, AdaptiveSessionError> {
        self.ensure_in_progress()?;

        if self
            .questions
            .iter()
            .any(|q| q.id == question_id && q.is_answered())
        {
            return Err(AdaptiveSessionError::AlreadyAnswered(question_id));
        }

        let now = Timestamp::now();
        let question = match self.questions.last_mut() {
            Some(q) if q.id == question_id && !q.is_answered() => q,
            _ => return Err(AdaptiveSessionError::QuestionNotOutstanding(question_id)),
        };
        question.answer = Some(choice);
        question.answered_at = Some(now);
        let index = question.index;
        self.updated_at = now;

        if index >= self.total_questions {
            Ok(AnswerOutcome::ReadyToComplete)
        } else {
            Ok(AnswerOutcome::NextQuestion { index: index + 1 })
        }
    }

    /// Completes the session with its stored result.
    ///
    /// Requires every question to be answered.
    pub fn complete(&mut self, result_id: ResultId) -> Result<(), AdaptiveSessionError> {
        self.ensure_in_progress()?;
        if self.current_index() < self.total_questions {
            return Err(AdaptiveSessionError::invalid_state(format!(
                "{} of {} questions answered",
                self.current_index(),
                self.total_questions
            )));
        }
        self.status = self
            .status
            .transition_to(AdaptiveSessionStatus::Completed)
            .map_err(|e| AdaptiveSessionError::invalid_state(e.to_string()))?;
        self.result_id = Some(result_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Abandons the session. Answers are kept.
    pub fn abandon(&mut self) -> Result<(), AdaptiveSessionError> {
        self.ensure_in_progress()?;
        self.status = self
            .status
            .transition_to(AdaptiveSessionStatus::Abandoned)
            .map_err(|e| AdaptiveSessionError::invalid_state(e.to_string()))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), AdaptiveSessionError> {
        if self.status != AdaptiveSessionStatus::InProgress {
            return Err(AdaptiveSessionError::NotInProgress(self.status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(n: u32) -> QuestionDraft {
        QuestionDraft {
            question_text: format!("Question {}", n),
            option_1: "A".to_string(),
            option_2: "B".to_string(),
            hint: Some("hint".to_string()),
            category: Some(if n % 2 == 0 { "EG_TT" } else { "AC_RF" }.to_string()),
        }
    }

    fn session(total: u32) -> AdaptiveSession {
        AdaptiveSession::start(
            SessionId::new(),
            AnalysisId::new("ai-egen-analysis").unwrap(),
            Gender::Female,
            total,
        )
        .unwrap()
    }

    fn answer_next(session: &mut AdaptiveSession, choice: Choice) -> AnswerOutcome {
        let n = session.questions().len() as u32 + 1;
        let id = session.issue_question(draft(n)).unwrap().id;
        session.record_answer(id, choice).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Creation Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn new_session_is_created_phase() {
        let s = session(12);
        assert_eq!(s.status(), AdaptiveSessionStatus::InProgress);
        assert_eq!(s.phase(), SessionPhase::Created);
        assert_eq!(s.current_index(), 0);
        assert!(s.outstanding_question().is_none());
    }

    #[test]
    fn zero_questions_is_rejected() {
        let result = AdaptiveSession::start(
            SessionId::new(),
            AnalysisId::new("x").unwrap(),
            Gender::Male,
            0,
        );
        assert!(matches!(
            result,
            Err(AdaptiveSessionError::ValidationFailed { .. })
        ));
    }

    // ───────────────────────────────────────────────────────────────
    // Question Flow Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn issued_question_is_outstanding() {
        let mut s = session(12);
        let id = s.issue_question(draft(1)).unwrap().id;

        assert_eq!(s.outstanding_question().map(|q| q.id), Some(id));
        assert_eq!(s.phase(), SessionPhase::AwaitingAnswer { index: 1 });
    }

    #[test]
    fn cannot_issue_while_question_outstanding() {
        let mut s = session(12);
        s.issue_question(draft(1)).unwrap();
        assert!(matches!(
            s.issue_question(draft(2)),
            Err(AdaptiveSessionError::InvalidState(_))
        ));
    }

    #[test]
    fn answer_advances_to_next_index() {
        let mut s = session(12);
        assert_eq!(answer_next(&mut s, Choice::First), AnswerOutcome::NextQuestion { index: 2 });
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn last_answer_is_ready_to_complete() {
        let mut s = session(3);
        answer_next(&mut s, Choice::First);
        answer_next(&mut s, Choice::Second);
        assert_eq!(answer_next(&mut s, Choice::First), AnswerOutcome::ReadyToComplete);
        assert_eq!(s.phase(), SessionPhase::ReadyToComplete);
        assert!(matches!(
            s.issue_question(draft(4)),
            Err(AdaptiveSessionError::InvalidState(_))
        ));
    }

    #[test]
    fn resubmission_is_already_answered() {
        let mut s = session(12);
        let id = s.issue_question(draft(1)).unwrap().id;
        s.record_answer(id, Choice::First).unwrap();

        assert_eq!(
            s.record_answer(id, Choice::Second),
            Err(AdaptiveSessionError::AlreadyAnswered(id))
        );
        assert_eq!(s.questions()[0].answer, Some(Choice::First));
    }

    #[test]
    fn unknown_question_is_not_outstanding() {
        let mut s = session(12);
        s.issue_question(draft(1)).unwrap();
        let stranger = QuestionId::new();

        assert_eq!(
            s.record_answer(stranger, Choice::First),
            Err(AdaptiveSessionError::QuestionNotOutstanding(stranger))
        );
        assert_eq!(s.current_index(), 0);
    }

    // ───────────────────────────────────────────────────────────────
    // Completion Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn complete_requires_all_answers() {
        let mut s = session(2);
        answer_next(&mut s, Choice::First);
        assert!(matches!(
            s.complete(ResultId::new()),
            Err(AdaptiveSessionError::InvalidState(_))
        ));
    }

    #[test]
    fn completed_session_rejects_answers() {
        let mut s = session(1);
        let id = s.issue_question(draft(1)).unwrap().id;
        s.record_answer(id, Choice::First).unwrap();
        let result_id = ResultId::new();
        s.complete(result_id).unwrap();

        assert_eq!(s.status(), AdaptiveSessionStatus::Completed);
        assert_eq!(s.result_id(), Some(result_id));
        assert_eq!(
            s.record_answer(id, Choice::First),
            Err(AdaptiveSessionError::NotInProgress(AdaptiveSessionStatus::Completed))
        );
    }

    #[test]
    fn abandon_is_terminal() {
        let mut s = session(12);
        s.issue_question(draft(1)).unwrap();
        s.abandon().unwrap();

        assert_eq!(s.phase(), SessionPhase::Abandoned);
        assert!(s.outstanding_question().is_none());
        assert!(s.abandon().is_err());
    }

    // ───────────────────────────────────────────────────────────────
    // Answer View Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn recent_answers_keeps_last_three() {
        let mut s = session(12);
        for choice in [Choice::First, Choice::Second, Choice::First, Choice::Second] {
            answer_next(&mut s, choice);
        }
        let recent = s.recent_answers(3);
        let indices: Vec<u32> = recent.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![2, 3, 4]);
        assert_eq!(recent[0].chosen, "B");
    }

    #[test]
    fn axis_answers_use_category_and_sign() {
        let mut s = session(12);
        answer_next(&mut s, Choice::First);
        answer_next(&mut s, Choice::Second);

        let answers = s.axis_answers();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].axis, "AC_RF");
        assert_eq!(answers[0].weight, 1.0);
        assert_eq!(answers[1].axis, "EG_TT");
        assert_eq!(answers[1].weight, -1.0);
    }

    #[test]
    fn stale_only_when_in_progress_and_old() {
        let s = session(12);
        let future = Timestamp::now().plus_secs(60);
        assert!(s.is_stale(future));
        assert!(!s.is_stale(s.updated_at().minus_minutes(1)));
    }
}
