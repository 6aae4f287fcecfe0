//! Result of scanning OCR text for lab values.

use serde::Serialize;

use crate::values::ParameterValues;

/// Why a non-empty line produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscardReason {
    /// The line has no `label: number` shape.
    NoPattern,
    /// The label matched no synonym.
    UnrecognizedLabel {
        label: String,
        /// Closest known parameter, for diagnostics only.
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
    /// The numeric token did not parse.
    InvalidNumber { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscardedLine {
    /// 1-based line number in the input text.
    pub line_number: usize,
    pub reason: DiscardReason,
}

/// Extracted values plus a record of every line that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionOutcome {
    pub values: ParameterValues,
    /// Number of non-empty lines examined.
    pub lines_scanned: usize,
    pub discarded: Vec<DiscardedLine>,
}

impl ExtractionOutcome {
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    /// Lines whose label was not recognized.
    pub fn unrecognized_labels(&self) -> impl Iterator<Item = &str> {
        self.discarded.iter().filter_map(|line| match &line.reason {
            DiscardReason::UnrecognizedLabel { label, .. } => Some(label.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
