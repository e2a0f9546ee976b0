//! alta-server entry point

use alta_server::utils::logger::init_logger;
use alta_server::{AppState, Config, api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let _log_guard = init_logger(config.log_dir.as_deref())?;

    tracing::info!(
        env = %config.environment,
        backend = ?config.storage_backend,
        timezone = %config.timezone,
        "Starting alta-server"
    );

    let state = AppState::new(&config).await?;
    if let Err(e) = state.catalog.init(state.store()).await {
        tracing::warn!(error = %e, "Catalog cache warmup failed, will load on demand");
    }

    let app = api::build_app(state.clone());

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("alta-server HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.catalog.dispose();
    tracing::info!("alta-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
