use std::time::Duration;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calculator_server::create_app;
use calculator_server::shared::config::Config;
use calculator_server::shared::database::Database;
use calculator_server::shared::services::{AppState, BlacklistCleanupScheduler};

const BLACKLIST_CLEANUP_PERIOD: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calculator_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let app_state = match config.database_url.clone() {
        Some(db_url) => {
            let db = Database::new(&db_url).await?;
            db.initialize().await?;
            tracing::info!("using PostgreSQL storage");
            AppState::new(config, db)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using in-memory storage");
            AppState::in_memory(config)
        }
    };

    BlacklistCleanupScheduler::new(app_state.revocations.clone(), BLACKLIST_CLEANUP_PERIOD).start();

    let app = create_app(app_state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("server running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/docs", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
