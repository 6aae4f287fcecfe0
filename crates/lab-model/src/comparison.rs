//! Per-parameter comparison against a reference range.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::enums::Status;

/// Placeholder used for both bounds when no range is configured.
pub const NOT_AVAILABLE: &str = "N/A";

/// The range a value was compared against.
///
/// Serializes as a two-element array: `[low, high]`, or `["N/A", "N/A"]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalRange {
    Bounds { low: f64, high: f64 },
    NotAvailable,
}

impl NormalRange {
    /// Render as `low-high`, or `N/A-N/A`.
    pub fn display(&self) -> String {
        match self {
            NormalRange::Bounds { low, high } => format!("{low}-{high}"),
            NormalRange::NotAvailable => format!("{NOT_AVAILABLE}-{NOT_AVAILABLE}"),
        }
    }
}

impl Serialize for NormalRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        match self {
            NormalRange::Bounds { low, high } => {
                tuple.serialize_element(low)?;
                tuple.serialize_element(high)?;
            }
            NormalRange::NotAvailable => {
                tuple.serialize_element(NOT_AVAILABLE)?;
                tuple.serialize_element(NOT_AVAILABLE)?;
            }
        }
        tuple.end()
    }
}

/// Outcome of comparing one parameter value with its reference range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub value: f64,
    /// Unit from the range table; empty when no range is configured.
    pub unit: String,
    pub status: Status,
    pub normal_range: NormalRange,
}

impl ComparisonResult {
    /// Result for a parameter with no configured reference range.
    pub fn unknown(value: f64) -> Self {
        Self {
            value,
            unit: String::new(),
            status: Status::Unknown,
            normal_range: NormalRange::NotAvailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_serialize_as_pair() {
        let range = NormalRange::Bounds {
            low: 0.6,
            high: 1.3,
        };
        assert_eq!(serde_json::to_string(&range).unwrap(), "[0.6,1.3]");
    }

    #[test]
    fn unknown_result_carries_placeholder_range() {
        let result = ComparisonResult::unknown(42.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "Unknown");
        assert_eq!(json["unit"], "");
        assert_eq!(json["normal_range"], serde_json::json!(["N/A", "N/A"]));
    }

    #[test]
    fn range_display() {
        let range = NormalRange::Bounds {
            low: 12.0,
            high: 17.5,
        };
        assert_eq!(range.display(), "12-17.5");
        assert_eq!(NormalRange::NotAvailable.display(), "N/A-N/A");
    }
}
