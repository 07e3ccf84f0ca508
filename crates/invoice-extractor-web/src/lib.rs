//! HTTP front end for invoice extraction.
//!
//! Routes:
//! - `GET /` health check
//! - `POST /api/extract` multipart upload of a single PDF (`file` field)

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod upload;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
///
/// `max_upload_bytes` caps the request body; larger uploads get a 413.
pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::health::health))
        .route("/api/extract", post(handlers::extract::extract))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        // Any origin, method and header; the origin is mirrored so
        // credentialed browser requests are accepted too.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
