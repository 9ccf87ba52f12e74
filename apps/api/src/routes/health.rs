use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and scoring backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "statement-reviewer",
        "backend": state.orchestrator.backend().label(),
        "suggestions": state.orchestrator.suggestions_enabled(),
        "max_submission_chars": state.config.max_submission_chars,
    }))
}
