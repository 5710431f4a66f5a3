//! PostgreSQL implementation of AdaptiveSessionRepository.
//!
//! A session is stored as one `adaptive_sessions` row plus one
//! `generated_questions` row per issued question. Every save runs in a
//! single transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::adaptive::{
    AdaptiveSession, AdaptiveSessionError, AdaptiveSessionStatus, GeneratedQuestion,
};
use crate::domain::foundation::{
    AnalysisId, Choice, DomainError, ErrorCode, Gender, QuestionId, ResultId, SessionId, Timestamp,
};
use crate::domain::resolution::QuizResult;
use crate::ports::AdaptiveSessionRepository;

/// PostgreSQL implementation of AdaptiveSessionRepository.
#[derive(Clone)]
pub struct PostgresAdaptiveSessionRepository {
    pool: PgPool,
}

impl PostgresAdaptiveSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_questions(&self, session_id: Uuid) -> Result<Vec<GeneratedQuestion>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, question_index, text, option_1, option_2, hint,
                   category, answer, answered_at, created_at
            FROM generated_questions
            WHERE session_id = $1
            ORDER BY question_index
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch questions"))?;

        rows.iter().map(row_to_question).collect()
    }

    async fn hydrate(&self, row: PgRow) -> Result<AdaptiveSession, DomainError> {
        let id: Uuid = row.try_get("id").map_err(db_error("Invalid session row"))?;
        let questions = self.load_questions(id).await?;
        row_to_session(&row, questions)
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn invalid_row(message: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid stored value: {}", message))
}

/// Writes the session row over an in-progress row only.
///
/// A completed or abandoned row is final; a stale in-progress copy must not
/// overwrite it.
async fn write_session_row(
    tx: &mut Transaction<'_, Postgres>,
    session: &AdaptiveSession,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE adaptive_sessions SET
            status = $2,
            result_id = $3,
            updated_at = $4
        WHERE id = $1 AND status = 'in_progress'
        "#,
    )
    .bind(session.id().as_uuid())
    .bind(session.status().as_str())
    .bind(session.result_id().map(|r| *r.as_uuid()))
    .bind(session.updated_at().as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(db_error("Failed to update session"))?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    let stored: Option<String> =
        sqlx::query_scalar("SELECT status FROM adaptive_sessions WHERE id = $1")
            .bind(session.id().as_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error("Failed to read session status"))?;

    match stored {
        None => Err(DomainError::new(
            ErrorCode::SessionNotFound,
            format!("Session not found: {}", session.id()),
        )),
        Some(status) => {
            let status = status.parse::<AdaptiveSessionStatus>().map_err(invalid_row)?;
            Err(AdaptiveSessionError::NotInProgress(status).into())
        }
    }
}

async fn upsert_questions(
    tx: &mut Transaction<'_, Postgres>,
    session: &AdaptiveSession,
) -> Result<(), DomainError> {
    for q in session.questions() {
        sqlx::query(
            r#"
            INSERT INTO generated_questions (
                id, session_id, question_index, text, option_1, option_2, hint,
                category, answer, answered_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                answer = EXCLUDED.answer,
                answered_at = EXCLUDED.answered_at
            "#,
        )
        .bind(q.id.as_uuid())
        .bind(session.id().as_uuid())
        .bind(q.index as i32)
        .bind(&q.text)
        .bind(&q.option_1)
        .bind(&q.option_2)
        .bind(&q.hint)
        .bind(&q.category)
        .bind(q.answer.map(|c| c.as_number() as i16))
        .bind(q.answered_at.map(|t| *t.as_datetime()))
        .bind(q.created_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to write question"))?;
    }
    Ok(())
}

#[async_trait]
impl AdaptiveSessionRepository for PostgresAdaptiveSessionRepository {
    async fn save_new(&self, session: &AdaptiveSession) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO adaptive_sessions (
                id, analysis_id, gender, status, total_questions, result_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.analysis_id().as_str())
        .bind(session.gender().as_str())
        .bind(session.status().as_str())
        .bind(session.total_questions() as i32)
        .bind(session.result_id().map(|r| *r.as_uuid()))
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert session"))?;

        if inserted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyExists,
                format!("Session already exists: {}", session.id()),
            ));
        }

        upsert_questions(&mut tx, session).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn update(&self, session: &AdaptiveSession) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        write_session_row(&mut tx, session).await?;
        upsert_questions(&mut tx, session).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn complete(
        &self,
        session: &AdaptiveSession,
        result: &QuizResult,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        write_session_row(&mut tx, session).await?;
        upsert_questions(&mut tx, session).await?;
        super::quiz_result_repository::insert_result(&mut *tx, result).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<AdaptiveSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, analysis_id, gender, status, total_questions, result_id,
                   created_at, updated_at
            FROM adaptive_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch session"))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_stale_in_progress(
        &self,
        cutoff: Timestamp,
    ) -> Result<Vec<AdaptiveSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, analysis_id, gender, status, total_questions, result_id,
                   created_at, updated_at
            FROM adaptive_sessions
            WHERE status = 'in_progress' AND updated_at < $1
            ORDER BY updated_at
            "#,
        )
        .bind(cutoff.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch stale sessions"))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(self.hydrate(row).await?);
        }
        Ok(sessions)
    }
}

fn row_to_session(
    row: &PgRow,
    questions: Vec<GeneratedQuestion>,
) -> Result<AdaptiveSession, DomainError> {
    let id: Uuid = row.try_get("id").map_err(db_error("Invalid session row"))?;
    let analysis_id: String = row
        .try_get("analysis_id")
        .map_err(db_error("Invalid session row"))?;
    let gender: String = row.try_get("gender").map_err(db_error("Invalid session row"))?;
    let status: String = row.try_get("status").map_err(db_error("Invalid session row"))?;
    let total: i32 = row
        .try_get("total_questions")
        .map_err(db_error("Invalid session row"))?;
    let result_id: Option<Uuid> = row
        .try_get("result_id")
        .map_err(db_error("Invalid session row"))?;
    let created_at = row
        .try_get("created_at")
        .map_err(db_error("Invalid session row"))?;
    let updated_at = row
        .try_get("updated_at")
        .map_err(db_error("Invalid session row"))?;

    Ok(AdaptiveSession::reconstitute(
        SessionId::from_uuid(id),
        AnalysisId::new(analysis_id).map_err(invalid_row)?,
        gender.parse::<Gender>().map_err(invalid_row)?,
        status.parse::<AdaptiveSessionStatus>().map_err(invalid_row)?,
        u32::try_from(total).map_err(invalid_row)?,
        questions,
        result_id.map(ResultId::from_uuid),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_question(row: &PgRow) -> Result<GeneratedQuestion, DomainError> {
    let read = db_error("Invalid question row");
    let answer: Option<i16> = row.try_get("answer").map_err(&read)?;
    let answer = match answer {
        Some(n) => {
            let n = u8::try_from(n).map_err(invalid_row)?;
            Some(Choice::try_from(n).map_err(invalid_row)?)
        }
        None => None,
    };
    let index: i32 = row.try_get("question_index").map_err(&read)?;
    let answered_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("answered_at").map_err(&read)?;

    Ok(GeneratedQuestion {
        id: QuestionId::from_uuid(row.try_get("id").map_err(&read)?),
        session_id: SessionId::from_uuid(row.try_get("session_id").map_err(&read)?),
        index: u32::try_from(index).map_err(invalid_row)?,
        text: row.try_get("text").map_err(&read)?,
        option_1: row.try_get("option_1").map_err(&read)?,
        option_2: row.try_get("option_2").map_err(&read)?,
        hint: row.try_get("hint").map_err(&read)?,
        category: row.try_get("category").map_err(&read)?,
        answer,
        answered_at: answered_at.map(Timestamp::from_datetime),
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(&read)?),
    })
}
