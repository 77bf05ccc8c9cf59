//! HTTP client for an OCR sidecar service.
//!
//! The sidecar exposes `POST /ocr` taking a multipart `file` field and
//! answering `{"text": …}` on success or `{"error": …}` on failure.

use async_trait::async_trait;
use reqwest::multipart;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{OcrEngine, OcrError};

pub struct RemoteOcrEngine {
    service_url: String,
    client: reqwest::Client,
}

impl RemoteOcrEngine {
    pub fn new(service_url: impl Into<String>, timeout: Duration) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("JurisClarify/0.1")
            .build()?;
        Ok(Self { service_url: service_url.into(), client })
    }

    fn endpoint(&self) -> String {
        format!("{}/ocr", self.service_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OcrEngine for RemoteOcrEngine {
    #[instrument(skip(self, bytes), fields(url = %self.endpoint(), size = bytes.len()))]
    async fn extract(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, OcrError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| OcrError::Processing(format!("invalid MIME type {mime_type}: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let resp = self.client.post(self.endpoint()).multipart(form).send().await?;
        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let msg = body["error"].as_str().unwrap_or("unknown OCR service error").to_string();
            return Err(OcrError::Processing(msg));
        }

        let text = body["text"].as_str().unwrap_or("").to_string();
        debug!(chars = text.len(), "OCR extraction returned text");
        Ok(text)
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let engine =
            RemoteOcrEngine::new("http://localhost:8884/", Duration::from_secs(5)).unwrap();
        assert_eq!(engine.endpoint(), "http://localhost:8884/ocr");
    }
}
