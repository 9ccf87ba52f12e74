//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::ingest::extract_text;
use crate::evaluation::models::{EvaluationResult, WeightTable};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub text: String,
    #[serde(default = "default_include_suggestions")]
    pub include_suggestions: bool,
}

fn default_include_suggestions() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluations
///
/// Scores a personal statement on content, narrative and language and
/// returns the composite score with optional improvement suggestions.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let result = state
        .orchestrator
        .run(&request.text, request.include_suggestions)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/evaluations/upload
///
/// Multipart form: `file` (.txt, .md or .pdf) and optional `include_suggestions`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut include_suggestions = true;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload.txt").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                upload = Some((file_name, data));
            }
            Some("include_suggestions") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                include_suggestions = value.trim().parse().map_err(|_| {
                    AppError::Validation(format!(
                        "include_suggestions must be true or false, got '{value}'"
                    ))
                })?;
            }
            _ => {}
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let text = extract_text(&file_name, data).await?;

    let result = state.orchestrator.run(&text, include_suggestions).await?;
    Ok(Json(result))
}

/// GET /api/v1/evaluations/weights
///
/// Returns the weight table used for every composite score.
pub async fn handle_get_weights(State(state): State<AppState>) -> Json<WeightTable> {
    Json(state.orchestrator.weights())
}
