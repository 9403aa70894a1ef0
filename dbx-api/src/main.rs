use anyhow::{Context, Result};
use dbx_api::{config, create_app, AppState, Config};
use dbx_apps::WorkspaceClientFactory;
use dbx_logging::LogSettings;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = dbx_logging::init_subscriber(&LogSettings::from_env(&config::log_level()));

    let config = Config::from_env().inspect_err(|e| error!("Configuration error: {}", e))?;

    info!("Starting Databricks Apps API");
    info!("Databricks Host: {}", config.databricks_host);
    info!("Allowed Origins: {:?}", config.allowed_origins);

    let factory = WorkspaceClientFactory::new(&config.workspace())
        .context("Failed to configure workspace client")?;
    let app = create_app(AppState::new(factory), &config.allowed_origins)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Shutting down Databricks Apps API");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Received shutdown signal");
}
