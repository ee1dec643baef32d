//! HTTP adapter
//!
//! `POST /query` runs one query; `GET /health` reports liveness.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{AppState, QueryRequest, QueryResponse, QueryResult, create_router};

use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use triage_application::RunQueryUseCase;

/// Errors raised while starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Serve the API on `addr` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after shutdown is signalled.
pub async fn serve<F>(
    use_case: Arc<RunQueryUseCase>,
    addr: &str,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router()
        .with_state(AppState::new(use_case))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("Server listening on: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)
}
