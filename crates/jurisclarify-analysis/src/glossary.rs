//! Glossary construction.
//!
//! Matches known legal terms against the lowercased document and pairs each
//! with a plain-language definition. Always returns between
//! [`MIN_GLOSSARY_ENTRIES`] and [`MAX_GLOSSARY_ENTRIES`] entries.

use jurisclarify_common::types::GlossaryEntry;

pub const MIN_GLOSSARY_ENTRIES: usize = 3;
pub const MAX_GLOSSARY_ENTRIES: usize = 5;

const GLOSSARY_TERMS: &[(&str, &str)] = &[
    ("indemnify", "To compensate someone for harm or loss. You agree to cover their losses in certain situations."),
    ("liability", "Legal responsibility for damages. Being liable means you can be held accountable."),
    ("breach", "Failure to fulfill contract terms. Breaking your obligations has consequences."),
    ("arbitration", "Resolving disputes outside court through a neutral third party."),
    ("terminate", "To end an agreement before its natural expiration."),
    ("non-compete", "Restriction preventing work with competitors for a set time and area."),
    ("confidential", "Information that must be kept private and not shared."),
    ("waive", "To voluntarily give up a right or claim."),
    ("penalty", "Punishment or fine for breaking rules or terms."),
];

/// Entries appended when the document matches too few terms.
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("Contract", "Legally binding agreement between parties."),
    ("Obligation", "Legal duty to do or not do something."),
    ("Party", "A person or organization bound by the agreement."),
];

/// Build the glossary for a lowercased document.
pub fn build_glossary(lowered: &str) -> Vec<GlossaryEntry> {
    let mut entries: Vec<GlossaryEntry> = GLOSSARY_TERMS
        .iter()
        .filter(|(term, _)| lowered.contains(term))
        .map(|(term, definition)| GlossaryEntry {
            term: title_case(term),
            definition: definition.to_string(),
        })
        .collect();

    for (term, definition) in DEFAULT_ENTRIES {
        if entries.len() >= MIN_GLOSSARY_ENTRIES {
            break;
        }
        entries.push(GlossaryEntry {
            term: term.to_string(),
            definition: definition.to_string(),
        });
    }
    entries.truncate(MAX_GLOSSARY_ENTRIES);
    entries
}

/// Capitalise each hyphen- or space-separated word ("non-compete" → "Non-Compete").
fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut at_word_start = true;
    for c in term.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matched_terms_are_title_cased() {
        let entries = build_glossary("the tenant shall indemnify the landlord for any breach or penalty");
        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["Indemnify", "Breach", "Penalty"]);
    }

    #[test]
    fn hyphenated_terms_title_case_both_words() {
        assert_eq!(title_case("non-compete"), "Non-Compete");
        assert_eq!(title_case("waive"), "Waive");
    }

    #[test]
    fn sparse_documents_get_default_entries() {
        let entries = build_glossary("plain text with a single waiver only");
        // "waive" matches inside "waiver"; padded with the two defaults.
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].term, "Waive");
        assert_eq!(entries[1].term, "Contract");
        assert_eq!(entries[2].term, "Obligation");
    }

    #[test]
    fn zero_match_documents_still_get_a_full_glossary() {
        let entries = build_glossary("the parties agree to cooperate in good faith");
        assert_eq!(entries.len(), MIN_GLOSSARY_ENTRIES);
        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["Contract", "Obligation", "Party"]);
    }

    #[test]
    fn glossary_is_capped_at_five() {
        let entries = build_glossary(
            "indemnify liability breach arbitration terminate non-compete confidential waive penalty",
        );
        assert_eq!(entries.len(), MAX_GLOSSARY_ENTRIES);
    }
}
