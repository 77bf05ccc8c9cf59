//! The document pipeline state machine.
//!
//! Exactly one phase is active at a time and every transition happens
//! inside `run` or `reset`; `run` takes `&mut self`, so two runs cannot
//! interleave on one pipeline value.

use std::sync::Arc;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use jurisclarify_common::types::AnalysisResult;

use crate::clients::{Simplifier, TextExtractor};
use crate::upload::{UploadedFile, DEFAULT_MAX_UPLOAD_BYTES};
use crate::PipelineError;

/// Placeholder used when text extraction fails. OCR failures never surface
/// to the user; the analysis proceeds on this text instead.
pub const OCR_FALLBACK_TEXT: &str =
    "Unable to extract text from the document. Please paste the text directly for analysis.";

/// Which view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Progress event emitted during a run (cloneable for broadcast).
#[derive(Debug, Clone, Serialize)]
pub struct PipelineEvent {
    pub run_id: Uuid,
    pub stage: String,
    pub message: String,
}

pub struct DocumentPipeline {
    extractor: Arc<dyn TextExtractor>,
    simplifier: Arc<dyn Simplifier>,
    max_upload_bytes: usize,
    progress_tx: Option<broadcast::Sender<PipelineEvent>>,

    phase: PipelinePhase,
    file_name: Option<String>,
    extracted_text: String,
    analysis: Option<AnalysisResult>,
    error: Option<String>,
}

impl DocumentPipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, simplifier: Arc<dyn Simplifier>) -> Self {
        Self {
            extractor,
            simplifier,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            progress_tx: None,
            phase: PipelinePhase::Idle,
            file_name: None,
            extracted_text: String::new(),
            analysis: None,
            error: None,
        }
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Attach a progress channel; stage events are sent best-effort.
    pub fn with_progress(mut self, tx: broadcast::Sender<PipelineEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn emit(&self, run_id: Uuid, stage: &str, message: String) {
        if let Some(ref tx) = self.progress_tx {
            let _ = tx.send(PipelineEvent { run_id, stage: stage.to_string(), message });
        }
    }

    /// Run one analysis. Strictly sequential: validate, extract, simplify.
    ///
    /// Extraction failures degrade silently to [`OCR_FALLBACK_TEXT`];
    /// validation and simplify failures transition to the `Error` phase and
    /// are returned to the caller.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, mime = %file.mime_type))]
    pub async fn run(&mut self, file: UploadedFile) -> Result<AnalysisResult, PipelineError> {
        let run_id = Uuid::new_v4();

        self.phase = PipelinePhase::Loading;
        self.file_name = Some(file.file_name.clone());
        self.analysis = None;
        self.error = None;
        self.emit(run_id, "validate", format!("Checking {}", file.file_name));

        if let Err(e) = file.validate(self.max_upload_bytes) {
            self.phase = PipelinePhase::Error;
            self.error = Some(e.to_string());
            self.emit(run_id, "error", e.to_string());
            return Err(e);
        }

        self.emit(run_id, "ocr", "Extracting text".to_string());
        let text = match self.extractor.extract_text(&file).await {
            Ok(text) => text,
            Err(e) => {
                // Silent degradation: observable only via output quality.
                warn!(error = %e, "Text extraction failed, using fallback text");
                OCR_FALLBACK_TEXT.to_string()
            }
        };
        self.extracted_text = text.clone();

        self.emit(run_id, "simplify", "Simplifying document".to_string());
        match self.simplifier.simplify(&text).await {
            Ok(result) => {
                info!(
                    run_id = %run_id,
                    flags = result.red_flags.len(),
                    terms = result.glossary.len(),
                    "Pipeline run complete"
                );
                self.phase = PipelinePhase::Success;
                self.analysis = Some(result.clone());
                self.emit(run_id, "complete", "Analysis ready".to_string());
                Ok(result)
            }
            Err(e) => {
                self.phase = PipelinePhase::Error;
                self.error = Some(e.to_string());
                self.emit(run_id, "error", e.to_string());
                Err(e)
            }
        }
    }

    /// Unconditionally return to the pristine idle state.
    pub fn reset(&mut self) {
        self.phase = PipelinePhase::Idle;
        self.file_name = None;
        self.extracted_text.clear();
        self.analysis = None;
        self.error = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jurisclarify_common::types::GlossaryEntry;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            summary: "This document contains approximately 3 words.".into(),
            red_flags: vec!["a".into(), "b".into(), "c".into()],
            glossary: vec![
                GlossaryEntry { term: "Indemnify".into(), definition: "d1".into() },
                GlossaryEntry { term: "Liability".into(), definition: "d2".into() },
                GlossaryEntry { term: "Breach".into(), definition: "d3".into() },
                GlossaryEntry { term: "Contract".into(), definition: "d4".into() },
                GlossaryEntry { term: "Obligation".into(), definition: "d5".into() },
            ],
        }
    }

    /// Counts calls and returns a fixed extraction.
    struct CountingExtractor {
        calls: AtomicUsize,
        response: Result<String, String>,
    }

    #[async_trait]
    impl TextExtractor for CountingExtractor {
        async fn extract_text(&self, _file: &UploadedFile) -> Result<String, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(PipelineError::Extraction)
        }
    }

    /// Records the text it was handed and returns a fixed outcome.
    struct RecordingSimplifier {
        calls: AtomicUsize,
        seen: Mutex<Option<String>>,
        response: Result<AnalysisResult, String>,
    }

    #[async_trait]
    impl Simplifier for RecordingSimplifier {
        async fn simplify(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some(text.to_string());
            self.response.clone().map_err(PipelineError::Simplify)
        }
    }

    fn build(
        extract: Result<String, String>,
        simplify: Result<AnalysisResult, String>,
    ) -> (Arc<CountingExtractor>, Arc<RecordingSimplifier>, DocumentPipeline) {
        let extractor = Arc::new(CountingExtractor { calls: AtomicUsize::new(0), response: extract });
        let simplifier = Arc::new(RecordingSimplifier {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(None),
            response: simplify,
        });
        let pipeline = DocumentPipeline::new(extractor.clone(), simplifier.clone());
        (extractor, simplifier, pipeline)
    }

    #[tokio::test]
    async fn text_file_is_rejected_before_any_collaborator_call() {
        let (extractor, simplifier, mut pipeline) =
            build(Ok("x".into()), Ok(sample_analysis()));
        let file = UploadedFile::new("doc.txt", "text/plain", vec![0; 8]);

        let err = pipeline.run(file).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
        assert_eq!(pipeline.phase(), PipelinePhase::Error);
        assert!(pipeline.error().unwrap().contains("text/plain"));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(simplifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected_at_the_gate() {
        let (extractor, _, pipeline) = build(Ok("x".into()), Ok(sample_analysis()));
        let mut pipeline = pipeline.with_max_upload_bytes(4);
        let file = UploadedFile::new("scan.png", "image/png", vec![0; 8]);

        assert!(pipeline.run(file).await.is_err());
        assert_eq!(pipeline.phase(), PipelinePhase::Error);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ocr_failure_degrades_to_fallback_text() {
        let (_, simplifier, mut pipeline) =
            build(Err("sidecar down".into()), Ok(sample_analysis()));
        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![0; 8]);

        let result = pipeline.run(file).await.unwrap();
        // Never surfaces as an error: the run succeeds on fallback text.
        assert_eq!(pipeline.phase(), PipelinePhase::Success);
        assert_eq!(pipeline.error(), None);
        assert_eq!(simplifier.seen.lock().unwrap().as_deref(), Some(OCR_FALLBACK_TEXT));
        assert_eq!(pipeline.extracted_text(), OCR_FALLBACK_TEXT);
        assert_eq!(result, sample_analysis());
    }

    #[tokio::test]
    async fn simplify_failure_surfaces_server_message() {
        let (_, _, mut pipeline) =
            build(Ok("Tenant shall pay...".into()), Err("No text provided for analysis".into()));
        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![0; 8]);

        let err = pipeline.run(file).await.unwrap_err();
        assert_eq!(err.to_string(), "No text provided for analysis");
        assert_eq!(pipeline.phase(), PipelinePhase::Error);
        assert_eq!(pipeline.error(), Some("No text provided for analysis"));
        assert_eq!(pipeline.analysis(), None);
    }

    #[tokio::test]
    async fn happy_path_lands_in_success_with_exact_values() {
        let (_, simplifier, mut pipeline) =
            build(Ok("Tenant shall pay...".into()), Ok(sample_analysis()));
        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![0; 8]);

        let result = pipeline.run(file).await.unwrap();
        assert_eq!(pipeline.phase(), PipelinePhase::Success);
        assert_eq!(pipeline.file_name(), Some("photo.jpg"));
        assert_eq!(pipeline.extracted_text(), "Tenant shall pay...");
        assert_eq!(simplifier.seen.lock().unwrap().as_deref(), Some("Tenant shall pay..."));
        assert_eq!(result.red_flags, vec!["a", "b", "c"]);
        assert_eq!(result.glossary.len(), 5);
        assert_eq!(pipeline.analysis(), Some(&sample_analysis()));
    }

    #[tokio::test]
    async fn reset_restores_pristine_idle_state_from_any_phase() {
        let (_, _, mut pipeline) =
            build(Ok("text".into()), Ok(sample_analysis()));
        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![0; 8]);
        pipeline.run(file).await.unwrap();
        assert_eq!(pipeline.phase(), PipelinePhase::Success);

        pipeline.reset();
        assert_eq!(pipeline.phase(), PipelinePhase::Idle);
        assert_eq!(pipeline.file_name(), None);
        assert_eq!(pipeline.extracted_text(), "");
        assert_eq!(pipeline.analysis(), None);
        assert_eq!(pipeline.error(), None);

        // And from the error phase too.
        let bad = UploadedFile::new("doc.txt", "text/plain", vec![0; 8]);
        let _ = pipeline.run(bad).await;
        assert_eq!(pipeline.phase(), PipelinePhase::Error);
        pipeline.reset();
        assert_eq!(pipeline.phase(), PipelinePhase::Idle);
        assert_eq!(pipeline.error(), None);
    }

    #[tokio::test]
    async fn progress_events_cover_each_stage() {
        let (_, _, pipeline) = build(Ok("text".into()), Ok(sample_analysis()));
        let (tx, mut rx) = broadcast::channel(16);
        let mut pipeline = pipeline.with_progress(tx);

        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![0; 8]);
        pipeline.run(file).await.unwrap();

        let mut stages = Vec::new();
        while let Ok(event) = rx.try_recv() {
            stages.push(event.stage);
        }
        assert_eq!(stages, vec!["validate", "ocr", "simplify", "complete"]);
    }
}
