//! `clipgate` server entry point.
//!
//! Start-up order: configuration, tracing, settings, service wiring, then
//! the HTTP server with graceful shutdown.

use clipgate::config::ServerConfig;
use clipgate::http::{AppState, router};
use clipgate::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use clipgate::workspace::{SettingsStore, WorkspaceError};
use mockable::DefaultClock;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Failures that abort start-up or serving.
#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid bind address: {0}")]
    BindAddress(#[from] AddrParseError),

    #[error("settings: {0}")]
    Settings(#[from] WorkspaceError),

    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = ServerConfig::from_env();
    init_tracing(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "clipgate starting");

    let settings = SettingsStore::new(&config.settings_path)?.load(true)?;
    info!(
        settings = %config.settings_path,
        workspace = %settings.workspace().root(),
        "settings loaded"
    );

    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    let state = AppState::new(service).with_workspace(settings.workspace().clone());
    let app = router(state);

    let addr: SocketAddr = config.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("clipgate stopped");
    Ok(())
}

fn init_tracing(config: &ServerConfig) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match config.log_level.parse::<EnvFilter>() {
            Ok(filter) => (filter, None),
            Err(err) => (EnvFilter::new("info"), Some(err)),
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if let Some(err) = rejected {
        warn!(
            filter = %config.log_level,
            error = %err,
            "CLIPGATE_LOG is not a valid tracing filter; falling back to info"
        );
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => warn!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutdown signal received");
}
