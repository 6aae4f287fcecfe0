//! Disease signatures: declarative parameter conditions with a confidence weight.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::KnowledgeError;

/// Comparison applied to a single parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    LessThan(f64),
    AtMost(f64),
    GreaterThan(f64),
    AtLeast(f64),
    /// Inclusive on both ends.
    Between { low: f64, high: f64 },
    /// Strictly below `low` or strictly above `high`.
    Outside { low: f64, high: f64 },
}

impl Condition {
    /// Build a condition from its configured operator and thresholds.
    pub fn from_parts(
        op: &str,
        value: Option<f64>,
        low: Option<f64>,
        high: Option<f64>,
    ) -> Result<Self, String> {
        let single = |value: Option<f64>| -> Result<f64, String> {
            let value = value.ok_or_else(|| format!("operator '{op}' requires `value`"))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("operator '{op}' has a non-finite threshold"))
            }
        };
        let pair = || -> Result<(f64, f64), String> {
            let (Some(low), Some(high)) = (low, high) else {
                return Err(format!("operator '{op}' requires `low` and `high`"));
            };
            if !low.is_finite() || !high.is_finite() {
                return Err(format!("operator '{op}' has a non-finite threshold"));
            }
            if low > high {
                return Err(format!("operator '{op}' has low {low} above high {high}"));
            }
            Ok((low, high))
        };

        match op.trim().to_lowercase().as_str() {
            "<" | "lt" => Ok(Condition::LessThan(single(value)?)),
            "<=" | "le" => Ok(Condition::AtMost(single(value)?)),
            ">" | "gt" => Ok(Condition::GreaterThan(single(value)?)),
            ">=" | "ge" => Ok(Condition::AtLeast(single(value)?)),
            "between" => {
                let (low, high) = pair()?;
                Ok(Condition::Between { low, high })
            }
            "outside" => {
                let (low, high) = pair()?;
                Ok(Condition::Outside { low, high })
            }
            other => Err(format!("unsupported operator '{other}'")),
        }
    }

    /// Whether `value` satisfies the condition. NaN never does.
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Condition::LessThan(t) => value < t,
            Condition::AtMost(t) => value <= t,
            Condition::GreaterThan(t) => value > t,
            Condition::AtLeast(t) => value >= t,
            Condition::Between { low, high } => value >= low && value <= high,
            Condition::Outside { low, high } => value < low || value > high,
        }
    }
}

/// A condition bound to a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub parameter: String,
    pub condition: Condition,
}

impl Indicator {
    pub fn holds(&self, value: f64) -> bool {
        self.condition.holds(value)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameter;
        match self.condition {
            Condition::LessThan(t) => write!(f, "{p} < {t}"),
            Condition::AtMost(t) => write!(f, "{p} <= {t}"),
            Condition::GreaterThan(t) => write!(f, "{p} > {t}"),
            Condition::AtLeast(t) => write!(f, "{p} >= {t}"),
            Condition::Between { low, high } => write!(f, "{p} between {low} and {high}"),
            Condition::Outside { low, high } => write!(f, "{p} outside {low}-{high}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseSignature {
    pub name: String,
    pub indicators: Vec<Indicator>,
    pub symptoms: Vec<String>,
    /// Base confidence (0-100) reached when every indicator holds.
    pub weight: f64,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Deserialize)]
struct RawDiseases {
    #[serde(default, rename = "disease")]
    diseases: Vec<RawDisease>,
}

#[derive(Debug, Deserialize)]
struct RawDisease {
    name: String,
    weight: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    recommendation: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default, rename = "indicator")]
    indicators: Vec<RawIndicator>,
}

#[derive(Debug, Deserialize)]
struct RawIndicator {
    parameter: String,
    op: String,
    value: Option<f64>,
    low: Option<f64>,
    high: Option<f64>,
}

/// Parse the `diseases.toml` format.
pub fn parse_diseases_toml(
    contents: &str,
    path: &Path,
) -> Result<Vec<DiseaseSignature>, KnowledgeError> {
    let raw: RawDiseases = toml::from_str(contents).map_err(|e| KnowledgeError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut names = BTreeSet::new();
    let mut signatures = Vec::with_capacity(raw.diseases.len());
    for disease in raw.diseases {
        let name = disease.name.trim().to_string();
        let invalid = |message: String| KnowledgeError::InvalidSignature {
            disease: name.clone(),
            message,
        };

        if name.is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !names.insert(name.clone()) {
            return Err(invalid("duplicate disease name".to_string()));
        }
        if !disease.weight.is_finite() || !(0.0..=100.0).contains(&disease.weight) {
            return Err(invalid(format!(
                "weight {} must be between 0 and 100",
                disease.weight
            )));
        }
        if disease.indicators.is_empty() {
            return Err(invalid("at least one indicator is required".to_string()));
        }

        let mut indicators = Vec::with_capacity(disease.indicators.len());
        for raw_indicator in disease.indicators {
            let parameter = raw_indicator.parameter.trim().to_string();
            if parameter.is_empty() {
                return Err(invalid("indicator parameter must not be empty".to_string()));
            }
            let condition = Condition::from_parts(
                &raw_indicator.op,
                raw_indicator.value,
                raw_indicator.low,
                raw_indicator.high,
            )
            .map_err(|message| invalid(format!("{parameter}: {message}")))?;
            indicators.push(Indicator {
                parameter,
                condition,
            });
        }

        signatures.push(DiseaseSignature {
            name,
            indicators,
            symptoms: disease.symptoms,
            weight: disease.weight,
            description: disease.description,
            recommendation: disease.recommendation,
        });
    }

    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Vec<DiseaseSignature>, KnowledgeError> {
        parse_diseases_toml(contents, Path::new("diseases.toml"))
    }

    #[test]
    fn parses_signature_with_indicators() {
        let signatures = parse(
            r#"
[[disease]]
name = "Kidney"
weight = 90.0
symptoms = ["Fatigue"]

[[disease.indicator]]
parameter = "Creatinine"
op = ">"
value = 1.3

[[disease.indicator]]
parameter = "Hemoglobin"
op = "between"
low = 6.0
high = 11.9
"#,
        )
        .unwrap();
        assert_eq!(signatures.len(), 1);
        let kidney = &signatures[0];
        assert_eq!(kidney.indicators.len(), 2);
        assert_eq!(kidney.indicators[0].to_string(), "Creatinine > 1.3");
        assert_eq!(
            kidney.indicators[1].to_string(),
            "Hemoglobin between 6 and 11.9"
        );
        assert_eq!(kidney.symptoms, vec!["Fatigue"]);
    }

    #[test]
    fn missing_threshold_is_rejected() {
        let err = parse(
            r#"
[[disease]]
name = "Kidney"
weight = 90.0

[[disease.indicator]]
parameter = "Creatinine"
op = ">"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("requires `value`"));
    }

    #[test]
    fn weight_above_hundred_is_rejected() {
        let err = parse(
            r#"
[[disease]]
name = "X"
weight = 120.0

[[disease.indicator]]
parameter = "WBC"
op = ">"
value = 1.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::InvalidSignature { .. }));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = Condition::from_parts("~", Some(1.0), None, None).unwrap_err();
        assert_eq!(err, "unsupported operator '~'");
    }

    #[test]
    fn conditions_hold_on_expected_sides() {
        assert!(Condition::LessThan(12.0).holds(11.9));
        assert!(!Condition::LessThan(12.0).holds(12.0));
        assert!(Condition::AtMost(12.0).holds(12.0));
        assert!(Condition::GreaterThan(1.3).holds(1.31));
        assert!(!Condition::GreaterThan(1.3).holds(1.3));
        assert!(Condition::AtLeast(1.3).holds(1.3));
        let between = Condition::Between {
            low: 1.0,
            high: 2.0,
        };
        assert!(between.holds(1.0) && between.holds(2.0) && !between.holds(2.1));
        let outside = Condition::Outside {
            low: 1.0,
            high: 2.0,
        };
        assert!(outside.holds(0.9) && outside.holds(2.1) && !outside.holds(1.0));
        assert!(!Condition::GreaterThan(1.0).holds(f64::NAN));
    }
}
