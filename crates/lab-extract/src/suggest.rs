//! Near-miss suggestions for labels no synonym matched.
//!
//! Suggestions are diagnostic only: extraction never uses them as values.

use lab_knowledge::SynonymTable;
use rapidfuzz::distance::jaro_winkler;

use crate::normalize::clean_label;

/// Minimum Jaro-Winkler similarity for a suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.88;

/// Closest parameter display name for an unrecognized label.
///
/// Each whitespace-separated word of the cleaned label, and the whole label,
/// is scored against every synonym. Ties keep the earlier table entry.
pub fn suggest(raw: &str, table: &SynonymTable) -> Option<String> {
    let cleaned = clean_label(raw);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let candidates: Vec<&str> = std::iter::once(cleaned)
        .chain(cleaned.split_whitespace())
        .collect();

    let mut best: Option<(f64, &str)> = None;
    for entry in table.entries() {
        for synonym in &entry.synonyms {
            for candidate in &candidates {
                let score = jaro_winkler::similarity(candidate.chars(), synonym.chars());
                if score < SUGGESTION_THRESHOLD {
                    continue;
                }
                if best.is_none_or(|(top, _)| score > top) {
                    best = Some((score, entry.key.as_str()));
                }
            }
        }
    }

    best.map(|(_, key)| table.display_name(key))
}

#[cfg(test)]
mod tests {
    use lab_knowledge::KnowledgeBase;

    use super::*;

    #[test]
    fn suggests_for_misspelled_labels() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(suggest("Hemoglobn", kb.synonyms()).as_deref(), Some("Hemoglobin"));
        assert_eq!(suggest("Kreatinine", kb.synonyms()).as_deref(), Some("Creatinine"));
        assert_eq!(suggest("Serum Bilirubn", kb.synonyms()).as_deref(), Some("Bilirubin"));
    }

    #[test]
    fn unrelated_labels_get_nothing() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(suggest("Cholesterol", kb.synonyms()), None);
        assert_eq!(suggest("  ", kb.synonyms()), None);
        assert_eq!(suggest("()", kb.synonyms()), None);
    }
}
