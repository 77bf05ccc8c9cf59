//! Pipeline collaborators.
//!
//! `TextExtractor` and `Simplifier` are the two network seams of the
//! pipeline. `HttpBackendClient` implements both against the analysis
//! backend's `/ocr` and `/simplify` endpoints; the web service wires
//! in-process implementations instead.

use async_trait::async_trait;
use jurisclarify_common::types::AnalysisResult;
use reqwest::multipart;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::upload::UploadedFile;
use crate::PipelineError;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, PipelineError>;
}

#[async_trait]
pub trait Simplifier: Send + Sync {
    async fn simplify(&self, text: &str) -> Result<AnalysisResult, PipelineError>;
}

// ── HTTP client against the analysis backend ─────────────────────────────────

pub struct HttpBackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("JurisClarify/0.1")
            .build()?;
        Ok(Self { base_url: base_url.into(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextExtractor for HttpBackendClient {
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, PipelineError> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| PipelineError::Extraction(format!("invalid MIME type: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let resp = self.client.post(self.url("/ocr")).multipart(form).send().await?;
        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PipelineError::Extraction(format!("OCR response was not JSON: {e}")))?;

        if !status.is_success() {
            return Err(PipelineError::Extraction(
                body["error"].as_str().unwrap_or("OCR request failed").to_string(),
            ));
        }

        let text = body["text"].as_str().unwrap_or("").to_string();
        debug!(chars = text.len(), "Backend OCR returned text");
        Ok(text)
    }
}

#[async_trait]
impl Simplifier for HttpBackendClient {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn simplify(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
        let resp = self
            .client
            .post(self.url("/simplify"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // Non-OK bodies carry {"error": …}; fall back to a fixed message.
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            return Err(PipelineError::Simplify(simplify_error_message(&body)));
        }

        let result: AnalysisResult = resp
            .json()
            .await
            .map_err(|e| PipelineError::Simplify(format!("analysis response did not validate: {e}")))?;
        Ok(result)
    }
}

/// Extract the server-provided message from a non-OK `/simplify` body.
pub(crate) fn simplify_error_message(body: &serde_json::Value) -> String {
    body["error"].as_str().unwrap_or("Simplification failed").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let c = HttpBackendClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(c.url("/simplify"), "http://localhost:8000/simplify");
    }

    #[test]
    fn simplify_error_prefers_server_message() {
        let body = serde_json::json!({ "error": "No text provided for analysis" });
        assert_eq!(simplify_error_message(&body), "No text provided for analysis");
    }

    #[test]
    fn simplify_error_falls_back_when_absent() {
        assert_eq!(simplify_error_message(&serde_json::json!({})), "Simplification failed");
        assert_eq!(simplify_error_message(&serde_json::Value::Null), "Simplification failed");
    }
}
