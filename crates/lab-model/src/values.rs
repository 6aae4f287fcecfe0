//! Canonical parameter values.

use std::collections::BTreeMap;

use crate::error::{LabError, Result};

/// Canonical parameter name to measured value.
///
/// A `BTreeMap` keeps every report built from it in name order.
pub type ParameterValues = BTreeMap<String, f64>;

/// Decode a JSON object of `{"Name": number}` into parameter values.
///
/// This is the shape submitted after manual correction of extracted values.
pub fn values_from_json(json: &str) -> Result<ParameterValues> {
    let values: ParameterValues = serde_json::from_str(json)?;
    ensure_finite(&values)?;
    Ok(values)
}

/// Reject NaN and infinite values.
pub fn ensure_finite(values: &ParameterValues) -> Result<()> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((parameter, _)) => Err(LabError::NonFiniteValue {
            parameter: parameter.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_integer_and_float_values() {
        let values = values_from_json(r#"{"WBC": 7200, "Hemoglobin": 13.5}"#).unwrap();
        assert_eq!(values.get("WBC"), Some(&7200.0));
        assert_eq!(values.get("Hemoglobin"), Some(&13.5));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = values_from_json(r#"{"WBC": "high"}"#).unwrap_err();
        assert!(matches!(err, LabError::Json(_)));
    }

    #[test]
    fn ensure_finite_names_the_offending_parameter() {
        let mut values = ParameterValues::new();
        values.insert("Creatinine".to_string(), 1.0);
        values.insert("SGPT".to_string(), f64::NAN);
        let err = ensure_finite(&values).unwrap_err();
        assert_eq!(err.to_string(), "value for SGPT is not a finite number");
    }
}
