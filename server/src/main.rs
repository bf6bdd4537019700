//! Tasklist server binary.

use anyhow::Context;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tasklist_server::infrastructure::{
    audit, config::Settings, server, telemetry::TelemetryBuilder,
};
use tasklist_server::state::AppState;
use tasklist_server::store::SqliteTaskStore;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Settings::new().context("Failed to load configuration")?;

    TelemetryBuilder::from_settings(&config.telemetry, env!("CARGO_PKG_VERSION"))
        .init()
        .context("Failed to initialize telemetry")?;

    info!("Tasklist server starting...");

    let store = match SqliteTaskStore::connect(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    {
        Ok(store) => {
            info!("Connected to task store");
            store
        }
        Err(e) => {
            error!("Task store connection error: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(Arc::new(store.clone())));

    audit::log_audit(&audit::AuditEvent::SystemStartup {
        component: "Server".into(),
    });

    let result = server::run_server(&config, state, shutdown_signal()).await;

    info!("Server stopped, cleaning up...");
    store.close().await;
    audit::log_audit(&audit::AuditEvent::SystemShutdown {
        reason: match result {
            Ok(()) => "Signal received".into(),
            Err(ref e) => format!("Server error: {e}"),
        },
    });

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
