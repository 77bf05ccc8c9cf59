//! Inference relay — forwards a prompt to the configured hosted backend.

use axum::{
    extract::{Json as JsonBody, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use jurisclarify_llm::LlmError;

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

/// POST /ask — `{"prompt": …}` → `{"answer": …}`, or HTTP 500
/// `{"error", "details"}` with a distinct `details` string per failure class.
pub async fn ask(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<AskRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(llm) = &state.llm else {
        return Err(relay_failure(
            "Inference backend not configured",
            "no API key or backend configured for /ask".to_string(),
        ));
    };

    info!(model = llm.model_id(), chars = req.prompt.len(), "Relaying prompt");

    match llm.complete(&req.prompt).await {
        Ok(answer) => Ok(Json(json!({ "answer": answer }))),
        Err(e) => {
            error!(error = %e, "Relay request failed");
            let (label, details) = classify_relay_error(&e);
            Err(relay_failure(label, details))
        }
    }
}

fn relay_failure(label: &str, details: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": label, "details": details })),
    )
}

/// Three-way relay taxonomy: upstream error status, upstream non-JSON body,
/// and process/transport exceptions each get their own label.
fn classify_relay_error(e: &LlmError) -> (&'static str, String) {
    match e {
        LlmError::Api { status, message } => {
            ("Upstream inference error", format!("[{status}] {message}"))
        }
        LlmError::MalformedResponse(details) => {
            ("Upstream returned a malformed response", details.clone())
        }
        other => ("Relay request failed", other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn taxonomy_is_three_way() {
        let (label, details) =
            classify_relay_error(&LlmError::Api { status: 429, message: "quota".into() });
        assert_eq!(label, "Upstream inference error");
        assert_eq!(details, "[429] quota");

        let (label, _) =
            classify_relay_error(&LlmError::MalformedResponse("not json".into()));
        assert_eq!(label, "Upstream returned a malformed response");

        let (label, _) = classify_relay_error(&LlmError::Unavailable("down".into()));
        assert_eq!(label, "Relay request failed");
    }
}
