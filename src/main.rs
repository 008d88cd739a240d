use std::sync::Arc;

use gsender::{init_logging, AppState, ConfigStore, EventFilter, ServerConfig, BUILD_DATE, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "Starting gSender");

    let config = ServerConfig::load_or_default(&ServerConfig::default_path()?)?;
    let store_path = config.resolved_store_path()?;
    let store = Arc::new(ConfigStore::open(&store_path)?);
    tracing::info!(path = %store_path.display(), "Config store ready");

    store.events().subscribe(EventFilter::All, |event| {
        tracing::debug!(category = %event.category(), "Record change: {}", event.description());
    });

    gsender::serve(&config, AppState::new(store), shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
