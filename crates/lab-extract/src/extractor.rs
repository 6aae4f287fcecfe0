//! Line scanner: finds `label: number` pairs in OCR text.

use std::sync::LazyLock;

use lab_knowledge::SynonymTable;
use lab_model::{DiscardReason, DiscardedLine, ExtractionOutcome, ParameterValues};
use regex::Regex;
use tracing::{debug, trace};

use crate::normalize::KeyNormalizer;
use crate::numeric::parse_f64;
use crate::suggest::suggest;

/// Label of letters, spaces, hyphens, parentheses and slashes, then a
/// colon/whitespace separator, then an integer or decimal token.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z \-()/]+)[:\s]+([0-9]+(?:\.[0-9]+)?)").expect("Invalid line regex")
});

/// Line breaks recognized in OCR text. `\r\n` counts once.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]")
        .expect("Invalid line break regex")
});

/// Splits `text` into lines on any recognized break. A trailing break does not
/// start an extra line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut lines = LINE_BREAK.split(text).peekable();
    std::iter::from_fn(move || {
        let line = lines.next()?;
        if line.is_empty() && lines.peek().is_none() {
            return None;
        }
        Some(line)
    })
}

/// Scans OCR text line by line.
#[derive(Debug, Clone, Copy)]
pub struct LineExtractor<'a> {
    normalizer: KeyNormalizer<'a>,
    suggestions: bool,
}

impl<'a> LineExtractor<'a> {
    pub fn new(table: &'a SynonymTable) -> Self {
        Self {
            normalizer: KeyNormalizer::new(table),
            suggestions: true,
        }
    }

    /// Skip the fuzzy lookup for unrecognized labels.
    pub fn without_suggestions(mut self) -> Self {
        self.suggestions = false;
        self
    }

    /// Canonical values found in `text`. Later lines overwrite earlier ones.
    pub fn extract(&self, text: &str) -> ParameterValues {
        self.extract_outcome(text).values
    }

    /// Values plus the line-level record of what was skipped.
    pub fn extract_outcome(&self, text: &str) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();

        for (index, line) in split_lines(text).enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            outcome.lines_scanned += 1;
            let line_number = index + 1;

            match self.scan_line(line) {
                Ok((name, value)) => {
                    if outcome.values.insert(name, value).is_some() {
                        trace!(line_number, "repeated parameter overwrites earlier value");
                    }
                }
                Err(reason) => {
                    trace!(line_number, "line discarded");
                    outcome.discarded.push(DiscardedLine {
                        line_number,
                        reason,
                    });
                }
            }
        }

        debug!(
            lines = outcome.lines_scanned,
            extracted = outcome.values.len(),
            discarded = outcome.discarded_count(),
            "extraction complete"
        );
        outcome
    }

    fn scan_line(&self, line: &str) -> Result<(String, f64), DiscardReason> {
        let captures = LINE_PATTERN
            .captures(line)
            .ok_or(DiscardReason::NoPattern)?;
        let label = captures.get(1).map_or("", |m| m.as_str()).trim();
        let token = captures.get(2).map_or("", |m| m.as_str());

        let Some(name) = self.normalizer.normalize(label) else {
            let suggestion = if self.suggestions {
                suggest(label, self.normalizer.table())
            } else {
                None
            };
            return Err(DiscardReason::UnrecognizedLabel {
                label: label.to_string(),
                suggestion,
            });
        };

        let value = parse_f64(token).ok_or_else(|| DiscardReason::InvalidNumber {
            token: token.to_string(),
        })?;
        Ok((name, value))
    }
}

/// Shorthand for [`LineExtractor::extract`].
pub fn extract(text: &str, table: &SynonymTable) -> ParameterValues {
    LineExtractor::new(table).extract(text)
}

#[cfg(test)]
mod tests {
    use lab_knowledge::KnowledgeBase;

    use super::*;

    #[test]
    fn pattern_is_unanchored() {
        let captures = LINE_PATTERN.captures("1. Hemoglobin - 13.2 g/dL").unwrap();
        assert_eq!(captures[1].trim(), "Hemoglobin -");
        assert_eq!(&captures[2], "13.2");
    }

    #[test]
    fn label_needs_a_separator() {
        assert!(LINE_PATTERN.captures("Hb9.0").is_none());
        assert!(LINE_PATTERN.captures("Hb 9.0").is_some());
    }

    #[test]
    fn splits_on_every_line_break() {
        let text = "a\r\nb\rc\nd\u{000B}e\u{000C}f\u{001C}g\u{0085}h\u{2028}i\u{2029}j\n";
        let lines: Vec<_> = split_lines(text).collect();
        assert_eq!(lines, ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[test]
    fn blank_lines_keep_their_numbers() {
        let lines: Vec<_> = split_lines("a\r\r\nb").collect();
        assert_eq!(lines, ["a", "", "b"]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn overflowing_token_is_reported() {
        let kb = KnowledgeBase::builtin().unwrap();
        let line = format!("Hemoglobin: {}", "9".repeat(400));
        let outcome = LineExtractor::new(kb.synonyms()).extract_outcome(&line);
        assert!(outcome.values.is_empty());
        assert!(matches!(
            outcome.discarded[0].reason,
            DiscardReason::InvalidNumber { .. }
        ));
    }
}
