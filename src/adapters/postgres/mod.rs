//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAdaptiveSessionRepository` - Sessions with their questions
//! - `PostgresResultRepository` - Stored quiz results
//!
//! Schema lives in `migrations/`; `MIGRATOR` applies it.

mod adaptive_session_repository;
mod quiz_result_repository;

pub use adaptive_session_repository::PostgresAdaptiveSessionRepository;
pub use quiz_result_repository::PostgresResultRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
