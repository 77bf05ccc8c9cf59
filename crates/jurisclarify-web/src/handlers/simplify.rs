//! Simplify endpoint — raw legal text in, analysis out.

use axum::{
    extract::{Json as JsonBody, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use jurisclarify_analysis::{simplify_bounded, AnalysisError};
use jurisclarify_common::error::ApiError;
use jurisclarify_common::types::AnalysisResult;

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    pub text: String,
}

/// POST /simplify — `{"text": …}` → `{summary, redFlags, glossary}`.
/// Empty text is a 400 `{"error": …}`.
pub async fn simplify_text(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<SimplifyRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!(chars = req.text.len(), "Received text for analysis");

    let result = simplify_bounded(&req.text, state.config.limits.max_text_chars)
        .map_err(|e| match e {
            AnalysisError::EmptyInput => ApiError::bad_request(e.to_string()),
        })?;

    info!("Analysis complete, returning result");
    Ok(Json(result))
}
