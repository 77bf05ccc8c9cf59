//! Full in-process pipeline endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use jurisclarify_common::error::ApiError;
use jurisclarify_common::types::AnalysisResult;
use jurisclarify_pipeline::{DocumentPipeline, PipelineError, UploadedFile};

use crate::engines::{EngineExtractor, LocalSimplifier};
use crate::handlers::ocr::read_file_field;
use crate::state::{AppEvent, SharedState};

/// POST /analyze — multipart `file` → runs upload → OCR → simplify and
/// returns the analysis JSON or the pipeline's error.
pub async fn analyze(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let (file_name, mime_type, bytes) = read_file_field(multipart).await?;
    let file = UploadedFile::new(file_name, mime_type, bytes);

    let result = run_pipeline(&state, file).await.map_err(pipeline_error)?;
    Ok(Json(result))
}

/// Build a per-request pipeline over the service's own engines and run it,
/// emitting lifecycle events onto the SSE channel.
pub(crate) async fn run_pipeline(
    state: &SharedState,
    file: UploadedFile,
) -> Result<AnalysisResult, PipelineError> {
    let file_name = file.file_name.clone();
    let _ = state
        .event_tx
        .send(AppEvent::AnalysisStarted { file_name: file_name.clone() });

    let mut pipeline = DocumentPipeline::new(
        Arc::new(EngineExtractor(state.ocr.clone())),
        Arc::new(LocalSimplifier { max_text_chars: state.config.limits.max_text_chars }),
    )
    .with_max_upload_bytes(state.config.limits.max_upload_bytes)
    .with_progress(state.pipeline_tx.clone());

    let outcome = pipeline.run(file).await;

    let _ = state.event_tx.send(AppEvent::AnalysisFinished {
        file_name,
        outcome: match &outcome {
            Ok(_) => "success".to_string(),
            Err(e) => e.to_string(),
        },
    });
    outcome
}

/// Map pipeline failures onto HTTP semantics.
pub(crate) fn pipeline_error(e: PipelineError) -> ApiError {
    match e {
        PipelineError::Validation(msg) => ApiError::bad_request(msg),
        other => ApiError::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_errors_are_client_errors() {
        let api = pipeline_error(PipelineError::Validation("bad mime".into()));
        assert_eq!(api.status, axum::http::StatusCode::BAD_REQUEST);
        let api = pipeline_error(PipelineError::Simplify("x".into()));
        assert_eq!(api.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
