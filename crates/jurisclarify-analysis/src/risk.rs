//! Red-flag detection.
//!
//! Ordered keyword scan over the lowercased document. Order matters: the
//! first three matches win, and the table is ranked roughly by severity.

/// Number of red flags every analysis returns.
pub const RED_FLAG_COUNT: usize = 3;

/// (keyword, warning) pairs, scanned in order.
const RISK_PATTERNS: &[(&str, &str)] = &[
    ("termination", "⚠️ HIGH RISK: Termination clauses present. Review exit conditions and penalties carefully."),
    ("terminate", "⚠️ HIGH RISK: Agreement can be terminated under certain conditions. Understand the terms."),
    ("liability", "🚨 CRITICAL: Liability clauses found. You may be financially responsible for damages or losses."),
    ("liable", "🚨 CRITICAL: You could be held liable. Understand your potential exposure."),
    ("indemnify", "⚠️ HIGH RISK: You may need to compensate the other party for certain claims or losses."),
    ("indemnification", "⚠️ HIGH RISK: Indemnity obligations exist. Could result in financial responsibility."),
    ("breach", "⚠️ MEDIUM RISK: Breach provisions outlined. Non-compliance has consequences."),
    ("penalty", "⚠️ HIGH RISK: Penalties for non-compliance. Review financial consequences."),
    ("penalties", "⚠️ HIGH RISK: Multiple penalty clauses detected."),
    ("fine", "⚠️ MEDIUM RISK: Fines may be imposed."),
    ("arbitration", "📋 MEDIUM RISK: Disputes resolved through arbitration, not court."),
    ("non-compete", "⚠️ HIGH RISK: Non-compete restrictions may limit future opportunities."),
    ("confidential", "🔒 MEDIUM RISK: Confidentiality obligations apply. Information must stay private."),
    ("waive", "⚠️ MEDIUM RISK: You may be waiving certain legal rights."),
    ("waiver", "⚠️ MEDIUM RISK: Rights waiver detected."),
];

/// Fallback flags used when the document matches fewer than three keywords.
const DEFAULT_FLAGS: &[&str] = &[
    "✅ No obvious high-risk clauses detected.",
    "💡 Always have a lawyer review legal documents.",
    "📋 Read the entire document carefully before signing.",
];

/// Scan lowercased text and return exactly [`RED_FLAG_COUNT`] flags,
/// topping up from the default list when fewer keywords match.
pub fn detect_red_flags(lowered: &str) -> Vec<String> {
    let mut flags: Vec<String> = RISK_PATTERNS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, warning)| warning.to_string())
        .collect();

    for default in DEFAULT_FLAGS {
        if flags.len() >= RED_FLAG_COUNT {
            break;
        }
        flags.push(default.to_string());
    }
    flags.truncate(RED_FLAG_COUNT);
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_document_gets_default_flags() {
        let flags = detect_red_flags("the parties agree to cooperate in good faith");
        assert_eq!(flags.len(), RED_FLAG_COUNT);
        assert!(flags[0].contains("No obvious high-risk"));
    }

    #[test]
    fn matches_are_capped_at_three() {
        let flags = detect_red_flags(
            "termination liability indemnify breach penalty arbitration waiver",
        );
        assert_eq!(flags.len(), RED_FLAG_COUNT);
        assert!(flags[0].contains("Termination clauses"));
        assert!(flags[1].contains("terminated under certain conditions"));
        assert!(flags[2].contains("Liability clauses"));
    }

    #[test]
    fn partial_matches_are_topped_up() {
        let flags = detect_red_flags("this agreement contains an arbitration clause");
        assert_eq!(flags.len(), RED_FLAG_COUNT);
        assert!(flags[0].contains("arbitration"));
        assert!(flags[1].contains("No obvious high-risk"));
    }

    #[test]
    fn substring_keywords_fire() {
        // "terminate" is a substring of "terminated"
        let flags = detect_red_flags("the lease may be terminated");
        assert!(flags.iter().any(|f| f.contains("terminated under certain conditions")));
    }
}
