//! OCR endpoint — extract text from an uploaded document.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use jurisclarify_common::error::ApiError;

use crate::state::SharedState;

/// POST /ocr — multipart `file` field → `{"text": …}`.
///
/// A disabled engine still answers 200 with its canned notice; only a real
/// engine failure becomes a 500 `{"error": …}`.
pub async fn ocr_extract(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (file_name, mime_type, bytes) = read_file_field(multipart).await?;
    info!(file_name = %file_name, content_type = %mime_type, size = bytes.len(), "Received file for OCR");

    let text = state
        .ocr
        .extract(&file_name, &mime_type, bytes)
        .await
        .map_err(|e| ApiError::internal(format!("OCR processing failed: {e}")))?;

    info!(chars = text.len(), "Extracted text");
    Ok(Json(json!({ "text": text })))
}

/// Pull the `file` part out of a multipart body.
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
) -> Result<(String, String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
        return Ok((file_name, mime_type, bytes.to_vec()));
    }
    Err(ApiError::bad_request("multipart field `file` is required"))
}
