//! In-process pipeline collaborators.
//!
//! Adapts the service's own OCR engine and simplify library to the
//! pipeline's `TextExtractor`/`Simplifier` seams, so `/analyze` and the
//! `/upload` page run the same pipeline the HTTP client does — without a
//! loopback network hop.

use std::sync::Arc;

use async_trait::async_trait;
use jurisclarify_analysis::{simplify_bounded, AnalysisError};
use jurisclarify_common::types::AnalysisResult;
use jurisclarify_ocr::OcrEngine;
use jurisclarify_pipeline::{PipelineError, Simplifier, TextExtractor, UploadedFile};

/// `TextExtractor` backed by the service's configured OCR engine.
pub struct EngineExtractor(pub Arc<dyn OcrEngine>);

#[async_trait]
impl TextExtractor for EngineExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, PipelineError> {
        self.0
            .extract(&file.file_name, &file.mime_type, file.bytes.clone())
            .await
            .map_err(|e| PipelineError::Extraction(e.to_string()))
    }
}

/// `Simplifier` backed by the in-process analysis engine.
pub struct LocalSimplifier {
    pub max_text_chars: usize,
}

#[async_trait]
impl Simplifier for LocalSimplifier {
    async fn simplify(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
        simplify_bounded(text, self.max_text_chars).map_err(|e| match e {
            AnalysisError::EmptyInput => PipelineError::Simplify(e.to_string()),
        })
    }
}
