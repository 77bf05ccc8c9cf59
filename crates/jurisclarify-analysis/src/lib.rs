//! jurisclarify-analysis — The simplify engine.
//!
//! Turns raw legal text into an [`AnalysisResult`]:
//!   1. Truncate input to the analysis window
//!   2. Produce a plain-language summary
//!   3. Scan for risk keywords and build exactly three red flags
//!   4. Build a glossary of matched legal terms (3–5 entries)
//!
//! Pure library — no I/O, no async. Both the `/simplify` endpoint and the
//! in-process pipeline call [`simplify`].

pub mod glossary;
pub mod risk;
pub mod summary;

use jurisclarify_common::types::AnalysisResult;
use thiserror::Error;
use tracing::debug;

/// Analysis window, in characters. Longer documents are truncated.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 3000;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No text provided for analysis")]
    EmptyInput,
}

/// Run the full simplify pass with the default analysis window.
pub fn simplify(text: &str) -> Result<AnalysisResult, AnalysisError> {
    simplify_bounded(text, DEFAULT_MAX_TEXT_CHARS)
}

/// Run the full simplify pass, truncating input to `max_chars` characters.
pub fn simplify_bounded(text: &str, max_chars: usize) -> Result<AnalysisResult, AnalysisError> {
    let text: String = text.trim().chars().take(max_chars).collect();
    if text.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let lowered = text.to_lowercase();
    let result = AnalysisResult {
        summary: summary::summarize(&text),
        red_flags: risk::detect_red_flags(&lowered),
        glossary: glossary::build_glossary(&lowered),
    };

    debug!(
        chars = text.len(),
        flags = result.red_flags.len(),
        terms = result.glossary.len(),
        "Analysis complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(simplify(""), Err(AnalysisError::EmptyInput)));
        assert!(matches!(simplify("   \n  "), Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn result_shape_is_stable() {
        let result = simplify("The tenant shall indemnify the landlord upon breach.").unwrap();
        assert_eq!(result.red_flags.len(), 3);
        assert!(result.glossary.len() >= 3 && result.glossary.len() <= 5);
        assert!(result.summary.contains("words"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(5000);
        // Must not panic on multi-byte boundaries.
        let result = simplify(&text).unwrap();
        assert!(!result.summary.is_empty());
    }
}
