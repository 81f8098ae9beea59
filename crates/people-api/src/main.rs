//! people-api - HTTP API server for the people & notes service

use tracing::info;

use people_api::telemetry::{init_tracing, LogConfig, DEFAULT_LOG_FILTER};
use people_api::{app, parse_allowed_origins, ApiConfig, AppState};
use people_db::{log_pool_metrics, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _file_guard = init_tracing(&log_config, DEFAULT_LOG_FILTER);
    info!(
        log_format = ?log_config.format,
        log_file = %log_config
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(stdout)".to_string()),
        "Logging initialized"
    );

    let config = ApiConfig::from_env()?;
    let addr = config.bind_addr()?;

    let db = Database::connect_with_config(&config.database_url, config.pool_config()).await?;
    db.migrate().await?;
    log_pool_metrics(db.pool());

    let app = app(
        AppState::new(db),
        parse_allowed_origins(&config.allowed_origins),
    );

    // Start server
    info!(
        database_url = %config.database_url,
        "Starting server on {}",
        addr
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
