//! PostgreSQL implementation of ResultRepository.
//!
//! Score maps and resolved details are stored as JSONB; the result key and
//! title are duplicated into columns for statistics queries.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Row};

use crate::domain::foundation::{
    AnalysisId, DomainError, ErrorCode, Gender, ResultId, SessionId, Timestamp,
};
use crate::domain::resolution::{QuizResult, ResolvedResult};
use crate::domain::scoring::AxisScoreMap;
use crate::ports::ResultRepository;

/// PostgreSQL implementation of ResultRepository.
#[derive(Clone)]
pub struct PostgresResultRepository {
    pool: PgPool,
}

impl PostgresResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Inserts a result; a second result for the same session is ignored.
pub(super) async fn insert_result<'e, E>(executor: E, result: &QuizResult) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO quiz_results (
            id, session_id, analysis_id, gender, result_key, title,
            strategy_kind, scores, resolved, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (session_id) DO NOTHING
        "#,
    )
    .bind(result.id.as_uuid())
    .bind(result.session_id.as_uuid())
    .bind(result.analysis_id.as_str())
    .bind(result.gender.as_str())
    .bind(result.result_key())
    .bind(result.title())
    .bind(result.resolved.strategy_kind.as_str())
    .bind(Json(&result.scores))
    .bind(Json(&result.resolved))
    .bind(result.created_at.as_datetime())
    .execute(executor)
    .await
    .map_err(db_error("Failed to insert result"))?;

    Ok(())
}

const SELECT_RESULT: &str = r#"
    SELECT id, session_id, analysis_id, gender, scores, resolved, created_at
    FROM quiz_results
"#;

#[async_trait]
impl ResultRepository for PostgresResultRepository {
    async fn save_if_absent(&self, result: &QuizResult) -> Result<QuizResult, DomainError> {
        insert_result(&self.pool, result).await?;

        self.find_by_session(&result.session_id).await?.ok_or_else(|| {
            DomainError::database(format!(
                "Result for session {} vanished after insert",
                result.session_id
            ))
        })
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<QuizResult>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE session_id = $1", SELECT_RESULT))
            .bind(session_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch result"))?;

        row.as_ref().map(row_to_result).transpose()
    }

    async fn find_by_analysis(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Vec<QuizResult>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE analysis_id = $1 ORDER BY created_at",
            SELECT_RESULT
        ))
        .bind(analysis_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch results by analysis"))?;

        rows.iter().map(row_to_result).collect()
    }
}

fn row_to_result(row: &PgRow) -> Result<QuizResult, DomainError> {
    let read = db_error("Invalid result row");
    let invalid = |e: crate::domain::foundation::ValidationError| {
        DomainError::database(format!("Invalid stored value: {}", e))
    };

    let analysis_id: String = row.try_get("analysis_id").map_err(&read)?;
    let gender: String = row.try_get("gender").map_err(&read)?;
    let scores: Json<AxisScoreMap> = row.try_get("scores").map_err(&read)?;
    let resolved: Json<ResolvedResult> = row.try_get("resolved").map_err(&read)?;

    Ok(QuizResult {
        id: ResultId::from_uuid(row.try_get("id").map_err(&read)?),
        session_id: SessionId::from_uuid(row.try_get("session_id").map_err(&read)?),
        analysis_id: AnalysisId::new(analysis_id).map_err(invalid)?,
        scores: scores.0,
        resolved: resolved.0,
        gender: gender.parse::<Gender>().map_err(invalid)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(&read)?),
    })
}
