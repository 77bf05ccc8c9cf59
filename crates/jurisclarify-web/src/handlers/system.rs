//! Service status and health check.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET / — service banner with capability flags.
pub async fn root(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "JurisClarify backend is live",
        "ocr": state.ocr.is_available(),
        "inference": state.llm.is_some(),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/ocr", "/simplify", "/analyze", "/upload", "/ask"],
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
