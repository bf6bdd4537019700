use crate::api::{self, health::health_check, tasks::handlers::unknown_task};
use crate::infrastructure::config::{BindAddress, Settings};
use crate::infrastructure::cors::cors_middleware;
use crate::state::AppState;
use axum::{middleware::from_fn, routing::get, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::Future;
use std::sync::Arc;

/// Builds the full application router: task routes plus health probe, with
/// CORS headers on every response.
///
/// The Prometheus endpoint is not part of this router because its recorder
/// is process-global; [`run_server`] adds it.
pub fn app(state: Arc<AppState>) -> Router {
    routes(state).layer(from_fn(cors_middleware))
}

/// Fixed paths share the `/{id}` namespace, so any method they do not serve
/// answers like an unknown task.
fn routes(state: Arc<AppState>) -> Router {
    api::task_routes()
        .route("/health", get(health_check).fallback(unknown_task))
        .with_state(state)
}

/// Runs the HTTP server until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the metrics recorder cannot be installed, the bind
/// address is invalid, or the server fails while running.
pub async fn run_server<F>(config: &Settings, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {e}"))?;

    let router = routes(state)
        .route(
            "/metrics",
            get(move || std::future::ready(handle.render())).fallback(unknown_task),
        )
        .layer(from_fn(cors_middleware));

    let addr = BindAddress::from(&config.server).to_socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
