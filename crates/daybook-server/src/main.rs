//! Daybook Server — application entry point.

use daybook_db::DbManager;
use daybook_server::{AppState, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("daybook=info".parse()?))
        .json()
        .init();

    tracing::info!("Starting Daybook server...");

    // Configuration errors (including a missing signing secret) are
    // fatal here, before any request is served.
    let settings = config::load_settings()?;

    let db = DbManager::connect(&settings.db_config()).await?;
    daybook_db::run_migrations(db.client()).await?;

    let state = AppState::new(db.client().clone(), settings.auth_config());
    let app = daybook_server::router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
