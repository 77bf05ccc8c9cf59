//! Analysis view rendering.
//!
//! Pure functions from an [`AnalysisResult`] to markup — no state, no side
//! effects. The `/upload` page embeds these fragments.

use jurisclarify_common::types::AnalysisResult;

/// Render a completed analysis as an HTML fragment.
pub fn render_analysis(file_name: &str, result: &AnalysisResult) -> String {
    let flags: String = result
        .red_flags
        .iter()
        .map(|flag| format!("<li class=\"flag\">{}</li>\n", escape(flag)))
        .collect();

    let glossary: String = result
        .glossary
        .iter()
        .map(|entry| {
            format!(
                "<dt>{}</dt><dd>{}</dd>\n",
                escape(&entry.term),
                escape(&entry.definition)
            )
        })
        .collect();

    format!(
        r#"<section class="analysis">
    <h2>Analysis of {file}</h2>
    <h3>📄 Summary</h3>
    <p>{summary}</p>
    <h3>🚩 Red Flags</h3>
    <ul>
{flags}    </ul>
    <h3>📖 Glossary</h3>
    <dl>
{glossary}    </dl>
</section>"#,
        file = escape(file_name),
        summary = escape(&result.summary),
    )
}

/// Render a pipeline failure as an HTML fragment.
pub fn render_error(message: &str) -> String {
    format!(r#"<div class="alert error">{}</div>"#, escape(message))
}

/// Minimal HTML escaping for text nodes.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurisclarify_common::types::GlossaryEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_all_result_fields() {
        let result = AnalysisResult {
            summary: "Short lease.".into(),
            red_flags: vec!["⚠️ risky".into(), "b".into(), "c".into()],
            glossary: vec![GlossaryEntry { term: "Breach".into(), definition: "Broken terms.".into() }],
        };
        let html = render_analysis("lease.pdf", &result);
        assert!(html.contains("Analysis of lease.pdf"));
        assert!(html.contains("Short lease."));
        assert!(html.contains("⚠️ risky"));
        assert!(html.contains("<dt>Breach</dt>"));
    }

    #[test]
    fn escapes_untrusted_text() {
        let result = AnalysisResult {
            summary: "<script>alert(1)</script>".into(),
            red_flags: vec![],
            glossary: vec![],
        };
        let html = render_analysis("a&b.pdf", &result);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b.pdf"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn error_fragment_is_escaped() {
        assert_eq!(
            render_error("bad <file>"),
            r#"<div class="alert error">bad &lt;file&gt;</div>"#
        );
    }
}
