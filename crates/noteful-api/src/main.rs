use tracing::info;

use noteful_api::{
    app,
    config::ServerConfig,
    logging::{self, LogConfig},
    AppState,
};
use noteful_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Kept alive so the file writer flushes on exit
    let _file_guard = logging::init(&LogConfig::from_env());

    let config = ServerConfig::from_env()?;

    info!(
        subsystem = "db",
        max_connections = config.pool.max_connections,
        min_connections = config.pool.min_connections,
        "Connecting to database..."
    );
    let db = Database::connect_with_config(&config.database_url, config.pool.clone()).await?;

    let addr = config.bind_addr()?;
    let router = app(AppState::new(db), config.cors_origins.clone());

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
