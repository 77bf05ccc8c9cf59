//! jurisclarify-pipeline — The upload → OCR → simplify pipeline.
//!
//! Orchestrates one document analysis end to end:
//!   1. Validate the uploaded file (MIME type, size cap)
//!   2. Extract text; any OCR failure silently degrades to placeholder text
//!   3. Simplify the text into summary / red flags / glossary
//!   4. Map the outcome onto a typed phase machine (Idle/Loading/Success/Error)
//!
//! Collaborators live behind [`clients::TextExtractor`] and
//! [`clients::Simplifier`], so the same pipeline runs in-process inside the
//! web service and over HTTP from the `analyze` CLI.

pub mod clients;
pub mod pipeline;
pub mod upload;

use thiserror::Error;

pub use clients::{HttpBackendClient, Simplifier, TextExtractor};
pub use pipeline::{DocumentPipeline, PipelineEvent, PipelinePhase, OCR_FALLBACK_TEXT};
pub use upload::UploadedFile;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("{0}")]
    Simplify(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}
