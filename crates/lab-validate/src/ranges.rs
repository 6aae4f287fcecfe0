//! Range evaluation: classify each value against its reference range.

use std::collections::BTreeMap;

use lab_knowledge::{RangeTable, ReferenceRange};
use lab_model::{ComparisonResult, NormalRange, ParameterValues, Status};
use tracing::debug;

/// Classify `value` against an inclusive range.
///
/// Non-finite values are `Unknown`.
pub fn classify(value: f64, range: &ReferenceRange) -> Status {
    if !value.is_finite() {
        Status::Unknown
    } else if value < range.low {
        Status::Low
    } else if value > range.high {
        Status::High
    } else {
        Status::Normal
    }
}

/// Compare one value with the table entry for `parameter`.
pub fn compare(parameter: &str, value: f64, ranges: &RangeTable) -> ComparisonResult {
    match ranges.get(parameter) {
        Some(range) => ComparisonResult {
            value,
            unit: range.unit.clone(),
            status: classify(value, range),
            normal_range: NormalRange::Bounds {
                low: range.low,
                high: range.high,
            },
        },
        None => ComparisonResult::unknown(value),
    }
}

/// Comparison result for every submitted parameter. Nothing is dropped.
pub fn evaluate(
    values: &ParameterValues,
    ranges: &RangeTable,
) -> BTreeMap<String, ComparisonResult> {
    let comparison: BTreeMap<String, ComparisonResult> = values
        .iter()
        .map(|(name, value)| (name.clone(), compare(name, *value, ranges)))
        .collect();

    let abnormal = comparison
        .values()
        .filter(|result| result.status.is_abnormal())
        .count();
    let unknown = comparison
        .values()
        .filter(|result| result.status == Status::Unknown)
        .count();
    debug!(
        parameters = comparison.len(),
        abnormal, unknown, "range evaluation complete"
    );
    comparison
}
