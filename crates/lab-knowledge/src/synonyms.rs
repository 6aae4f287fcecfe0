//! Label vocabulary: canonical parameter keys and the substrings that identify them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::KnowledgeError;

/// One canonical parameter and its identifying substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymEntry {
    pub key: String,
    pub synonyms: Vec<String>,
}

/// Ordered synonym table.
///
/// Entry order is match priority: the first entry with a synonym contained in
/// a cleaned label claims it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
    display: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawSynonyms {
    #[serde(default, rename = "parameter")]
    parameters: Vec<RawEntry>,
    #[serde(default)]
    display: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    key: String,
    synonyms: Vec<String>,
}

impl SynonymTable {
    /// Build a table, checking keys are unique and synonyms are matchable.
    pub fn new(
        entries: Vec<SynonymEntry>,
        display: BTreeMap<String, String>,
    ) -> Result<Self, KnowledgeError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            let key = entry.key.trim();
            if key.is_empty() {
                return Err(invalid("parameter key must not be empty".to_string()));
            }
            if !seen.insert(key.to_lowercase()) {
                return Err(invalid(format!("duplicate parameter key '{key}'")));
            }
            if entry.synonyms.is_empty() {
                return Err(invalid(format!("parameter '{key}' has no synonyms")));
            }
            for synonym in &entry.synonyms {
                if synonym.trim().is_empty() {
                    return Err(invalid(format!("parameter '{key}' has a blank synonym")));
                }
                if !synonym.chars().all(is_label_char) {
                    return Err(invalid(format!(
                        "synonym '{synonym}' of '{key}' must use only lowercase [a-z0-9 ]"
                    )));
                }
            }
        }
        Ok(Self { entries, display })
    }

    /// Parse the `synonyms.toml` format.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, KnowledgeError> {
        let raw: RawSynonyms = toml::from_str(contents).map_err(|e| KnowledgeError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        let entries = raw
            .parameters
            .into_iter()
            .map(|entry| SynonymEntry {
                key: entry.key.trim().to_string(),
                synonyms: entry.synonyms,
            })
            .collect();
        Self::new(entries, raw.display)
    }

    /// Entries in match-priority order.
    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    /// Emitted name for a canonical key.
    ///
    /// Keys without a display entry get their first letter capitalized.
    pub fn display_name(&self, key: &str) -> String {
        match self.display.get(key) {
            Some(name) => name.clone(),
            None => capitalize_first(key),
        }
    }

    /// Display names of every entry, in priority order.
    pub fn display_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| self.display_name(&entry.key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn invalid(message: String) -> KnowledgeError {
    KnowledgeError::InvalidSynonyms { message }
}

fn is_label_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ' '
}

fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
