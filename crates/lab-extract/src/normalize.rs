//! Raw label to canonical parameter name.

use lab_knowledge::SynonymTable;

/// Lowercase `raw` and drop everything outside `[a-z0-9 ]`.
pub fn clean_label(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == ' ')
        .collect()
}

/// Resolves report labels through a synonym table.
///
/// Matching is literal substring containment on the cleaned label, tried in
/// table order; the first entry with any contained synonym wins. A synonym
/// that occurs inside an unrelated word still matches.
#[derive(Debug, Clone, Copy)]
pub struct KeyNormalizer<'a> {
    table: &'a SynonymTable,
}

impl<'a> KeyNormalizer<'a> {
    pub fn new(table: &'a SynonymTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a SynonymTable {
        self.table
    }

    /// Canonical table key for `raw`, before display mapping.
    pub fn canonical_key(&self, raw: &str) -> Option<&'a str> {
        let cleaned = clean_label(raw);
        self.table
            .entries()
            .iter()
            .find(|entry| {
                entry
                    .synonyms
                    .iter()
                    .any(|synonym| cleaned.contains(synonym.as_str()))
            })
            .map(|entry| entry.key.as_str())
    }

    /// Emitted parameter name for `raw`, or `None` if no synonym matches.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        self.canonical_key(raw)
            .map(|key| self.table.display_name(key))
    }
}

/// Shorthand for [`KeyNormalizer::normalize`].
pub fn normalize(raw: &str, table: &SynonymTable) -> Option<String> {
    KeyNormalizer::new(table).normalize(raw)
}
