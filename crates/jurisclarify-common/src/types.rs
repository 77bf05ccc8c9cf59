//! Wire types shared between the analysis engine, the pipeline, and the web API.
//!
//! Field names are part of the public API contract (`redFlags`,
//! `glossary[{term,definition}]`) and must not drift.

use serde::{Deserialize, Serialize};

/// A completed document analysis: plain-language summary, risk flags,
/// and a glossary of legal terms. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(rename = "redFlags")]
    pub red_flags: Vec<String>,
    pub glossary: Vec<GlossaryEntry>,
}

/// A legal term paired with a plain-language definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Document categories the upload gate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

impl DocumentKind {
    /// Classify a MIME type. Accepts `image/*` and anything containing
    /// `pdf`; everything else is rejected before any network call.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.contains("pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}
