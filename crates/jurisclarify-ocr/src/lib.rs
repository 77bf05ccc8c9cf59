//! jurisclarify-ocr — Optical character recognition engines.
//!
//! The service never runs OCR in-process; it bridges to an OCR sidecar
//! service over HTTP, or runs with OCR disabled, in which case extraction
//! returns a canned notice and the caller degrades to paste-your-text.
//!
//! Engines:
//!   RemoteOcrEngine — multipart POST to a tesseract-style sidecar
//!   DisabledOcr     — no engine configured; canned notice text

pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

pub use remote::RemoteOcrEngine;

/// Text returned when no OCR engine is configured. Deliberately not an
/// error: the analysis flow continues with this as the extracted text.
pub const OCR_UNAVAILABLE_TEXT: &str =
    "OCR not available. Please paste text directly for analysis.";

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("OCR processing failed: {0}")]
    Processing(String),
}

/// A text-extraction engine for uploaded document images and PDFs.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract plain text from a document.
    async fn extract(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>)
        -> Result<String, OcrError>;

    /// Whether a real engine backs this instance (reported on `/`).
    fn is_available(&self) -> bool;
}

/// Engine used when no OCR service is configured.
pub struct DisabledOcr;

#[async_trait]
impl OcrEngine for DisabledOcr {
    async fn extract(
        &self,
        _file_name: &str,
        _mime_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, OcrError> {
        Ok(OCR_UNAVAILABLE_TEXT.to_string())
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_engine_returns_canned_text() {
        let engine = DisabledOcr;
        let text = engine.extract("lease.png", "image/png", vec![1, 2, 3]).await.unwrap();
        assert_eq!(text, OCR_UNAVAILABLE_TEXT);
        assert!(!engine.is_available());
    }
}
