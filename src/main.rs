//! Persona Lens session janitor
//!
//! Loads the quiz catalog, connects to PostgreSQL and periodically abandons
//! adaptive sessions that stopped receiving answers.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use persona_lens::adapters::catalog::YamlQuizCatalog;
use persona_lens::adapters::postgres::{PostgresAdaptiveSessionRepository, MIGRATOR};
use persona_lens::application::{SessionLocks, SweepStaleSessionsHandler};
use persona_lens::config::AppConfig;
use persona_lens::domain::foundation::Timestamp;
use persona_lens::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.log);

    // Fail fast on broken content
    let catalog = YamlQuizCatalog::load(&config.catalog.path).await?;
    tracing::info!(analyses = catalog.analysis_count(), "Catalog ready");

    let Some(url) = config.database.url() else {
        tracing::warn!("No database configured; sessions live in memory, nothing to sweep");
        return Ok(());
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(url)
        .await?;
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let sweeper = SweepStaleSessionsHandler::new(
        Arc::new(PostgresAdaptiveSessionRepository::new(pool.clone())),
        Arc::new(SessionLocks::new()),
        config.adaptive.stale_after_minutes,
    );

    let mut ticker = tokio::time::interval(config.adaptive.sweep_interval());
    tracing::info!(
        interval_secs = config.adaptive.sweep_interval_secs,
        stale_after_minutes = config.adaptive.stale_after_minutes,
        "Session janitor started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sweeper.handle(Timestamp::now()).await {
                    Ok(report) if !report.failed.is_empty() => {
                        tracing::warn!(failed = report.failed.len(), "Sweep left sessions behind");
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!(error = %e, "Sweep failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    pool.close().await;
    Ok(())
}
