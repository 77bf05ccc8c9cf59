//! Structured document analysis via a generative backend.
//!
//! Alternate path to the keyword engine: ask the model for the exact
//! summary/redFlags/glossary shape and validate the parsed JSON before it
//! reaches any caller.

use jurisclarify_common::types::AnalysisResult;
use tracing::{instrument, warn};

use crate::backend::{LlmBackend, LlmError};

/// Response schema for the analysis shape (Gemini schema dialect; also
/// embedded verbatim in prompts for backends without native schemas).
pub fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "redFlags": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "glossary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": { "type": "STRING" },
                        "definition": { "type": "STRING" }
                    },
                    "required": ["term", "definition"]
                }
            }
        },
        "required": ["summary", "redFlags", "glossary"]
    })
}

fn build_prompt(document_text: &str) -> String {
    format!(
        "You are a legal document assistant. Analyze the following legal document \
         for a non-lawyer.\n\
         Produce:\n\
         - \"summary\": a short plain-language summary of the document\n\
         - \"redFlags\": exactly 3 one-sided or risky clauses, each as one sentence\n\
         - \"glossary\": 5 legal terms from the document, each with a plain-language \
         definition\n\n\
         Document:\n{document_text}"
    )
}

/// Ask `backend` to analyze `document_text`, validating the structured
/// response at the boundary.
#[instrument(skip(backend, document_text), fields(model = backend.model_id()))]
pub async fn analyze_document(
    backend: &dyn LlmBackend,
    document_text: &str,
) -> Result<AnalysisResult, LlmError> {
    let prompt = build_prompt(document_text);
    let raw = backend.complete_structured(&prompt, &analysis_schema()).await?;
    parse_analysis(&raw)
}

/// Parse and validate the model's JSON into an [`AnalysisResult`].
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, LlmError> {
    let cleaned = strip_code_fence(raw);
    let result: AnalysisResult = serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, "Model returned JSON that does not match the analysis shape");
        LlmError::MalformedResponse(format!("analysis JSON did not validate: {e}"))
    })?;
    if result.summary.trim().is_empty() {
        return Err(LlmError::MalformedResponse("analysis summary was empty".to_string()));
    }
    Ok(result)
}

/// Some backends wrap JSON in a markdown code fence despite instructions.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID: &str = r#"{"summary":"A lease.","redFlags":["a","b","c"],
        "glossary":[{"term":"Breach","definition":"Broken terms."}]}"#;

    #[test]
    fn parses_valid_analysis() {
        let result = parse_analysis(VALID).unwrap();
        assert_eq!(result.red_flags, vec!["a", "b", "c"]);
        assert_eq!(result.glossary.len(), 1);
    }

    #[test]
    fn strips_markdown_fences() {
        let fenced = format!("```json\n{VALID}\n```");
        let result = parse_analysis(&fenced).unwrap();
        assert_eq!(result.summary, "A lease.");
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse_analysis(r#"{"answer":"not the shape"}"#).is_err());
        assert!(parse_analysis("not json at all").is_err());
    }

    #[test]
    fn rejects_empty_summary() {
        let raw = r#"{"summary":"  ","redFlags":[],"glossary":[]}"#;
        assert!(matches!(parse_analysis(raw), Err(LlmError::MalformedResponse(_))));
    }

    #[test]
    fn schema_names_the_wire_fields() {
        let schema = analysis_schema();
        assert!(schema["properties"]["redFlags"].is_object());
        assert_eq!(schema["required"][0], "summary");
    }
}
