use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bikes_server::config::AppConfig;
use bikes_server::feed::{FeedClient, FeedConfig};
use bikes_server::store::{SessionManager, SqliteConnector};
use bikes_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast: there is no partial-service mode without a store
    let sessions = match SessionManager::init(
        Arc::new(SqliteConnector::new()),
        config.connection_string.clone(),
    ) {
        Ok(sessions) => Arc::new(sessions),
        Err(e) => {
            error!(error = %e, "failed to connect to store");
            return ExitCode::FAILURE;
        }
    };

    let feed = match FeedClient::new(FeedConfig::new().with_url(config.feed_url.clone())) {
        Ok(feed) => feed,
        Err(e) => {
            error!(error = %e, "failed to create feed client");
            sessions.close();
            return ExitCode::FAILURE;
        }
    };

    let monitor = sessions.spawn_monitor(config.keepalive_interval);

    let app = create_router(AppState::new(Arc::clone(&sessions), feed));

    let exit = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => {
            info!(addr = %config.bind_addr, "bike-share API listening");
            info!("  GET  /health");
            info!("  GET  /stations");
            info!("  GET  /station/{{terminal_id}}");
            info!("  GET  /history/{{terminal_id}}");
            info!("  GET  /terminals");

            match axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
            {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %e, "server error");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            ExitCode::FAILURE
        }
    };

    monitor.stop().await;
    sessions.close();
    exit
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
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
                error!(error = %e, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
