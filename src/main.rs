use anyhow::Context;
use std::path::Path;
use trivia_api::db::{self, SqlitePool};
use trivia_api::{AppState, Settings, csv, logger, router, trivia};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("failed to load settings")?;
    logger::init(&settings.log_filter, settings.log_file.as_deref())?;

    let pool = db::open_pool(&settings.database_path, settings.pool_size).with_context(|| {
        format!(
            "failed to open database at {}",
            settings.database_path.display()
        )
    })?;
    prepare_database(&pool, settings.seed_csv.as_deref())?;

    let listener = tokio::net::TcpListener::bind(settings.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}:{}", settings.host, settings.port))?;
    tracing::info!(addr = %listener.local_addr()?, "trivia api listening");

    axum::serve(listener, router(AppState::new(pool)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn prepare_database(pool: &SqlitePool, seed_csv: Option<&Path>) -> anyhow::Result<()> {
    let mut conn = pool.get()?;

    let report = db::run_migrations(&mut conn).context("database migration failed")?;
    tracing::info!(
        applied = report.applied_migrations().len(),
        "database migrations complete"
    );

    if let Some(path) = seed_csv {
        let drafts = csv::load_question_csv(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seeded = trivia::seed_if_empty(&mut conn, drafts)
            .with_context(|| format!("failed to import {}", path.display()))?;
        if seeded > 0 {
            tracing::info!(seeded, path = %path.display(), "seeded questions");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
