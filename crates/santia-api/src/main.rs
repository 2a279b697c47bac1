use std::env;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use santia_api::config::Config;
use santia_api::state::{self, AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before logging init so RUST_LOG from .env applies.
    let dotenv = dotenvy::dotenv();

    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    match &dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("ignoring unreadable .env: {e}"),
    }

    let config = Config::from_env()?;
    let store = state::connect_store(&config.store).await;
    let app = santia_api::app(AppState::new(store), config.cors_origins.layer());

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))?;
    } else {
        let listener = tokio::net::TcpListener::bind(config.bind_addr)
            .await
            .wrap_err_with(|| format!("failed to bind {}", config.bind_addr))?;
        tracing::info!(addr = %config.bind_addr, "santia api listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    // The router, and with it the last store handle, is dropped by now.
    tracing::info!("document store released, shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT (Ctrl+C), shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
