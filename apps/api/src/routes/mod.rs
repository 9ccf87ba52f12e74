pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

/// Uploads may be PDFs, which run larger than the default 2 MB JSON limit.
const UPLOAD_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/evaluations", post(handlers::handle_evaluate))
        .route(
            "/api/v1/evaluations/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES)),
        )
        .route(
            "/api/v1/evaluations/weights",
            get(handlers::handle_get_weights),
        )
        .with_state(state)
}
