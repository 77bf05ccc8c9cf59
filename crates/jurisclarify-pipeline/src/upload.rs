//! Upload gate: file identity and validation.

use jurisclarify_common::types::DocumentKind;

use crate::PipelineError;

/// Default upload cap (10 MB), matching the advertised limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An uploaded document. Ephemeral — held only for the duration of one
/// pipeline run, never persisted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into(), bytes }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.mime_type)
    }

    /// Gate check: MIME type must be `image/*` or contain `pdf`, and the
    /// payload must fit under `max_bytes`. Runs before any collaborator call.
    pub fn validate(&self, max_bytes: usize) -> Result<(), PipelineError> {
        if self.kind().is_none() {
            return Err(PipelineError::Validation(format!(
                "Unsupported file type: {}. Please upload an image or PDF.",
                self.mime_type
            )));
        }
        if self.bytes.len() > max_bytes {
            // Sub-megabyte caps would render as "0 MB"; show bytes instead.
            let limit = if max_bytes >= 1024 * 1024 {
                format!("{} MB", max_bytes / (1024 * 1024))
            } else {
                format!("{max_bytes} bytes")
            };
            return Err(PipelineError::Validation(format!(
                "File is larger than the {limit} upload limit."
            )));
        }
        Ok(())
    }
}
