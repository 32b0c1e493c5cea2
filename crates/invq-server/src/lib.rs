//! HTTP service for invoice ingestion.
//!
//! `POST /process` turns a PDF reference into an invoice record and keeps
//! the queue item and attachment statuses in step; `GET /health` is a
//! liveness probe.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(routes::process_handler))
        .route("/health", get(routes::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
