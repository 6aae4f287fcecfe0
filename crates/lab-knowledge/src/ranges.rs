//! Reference range table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::KnowledgeError;

/// Inclusive normal range for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub parameter: String,
    pub unit: String,
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub fn new(
        parameter: impl Into<String>,
        unit: impl Into<String>,
        low: f64,
        high: f64,
    ) -> Result<Self, KnowledgeError> {
        let parameter = parameter.into();
        if !low.is_finite() || !high.is_finite() {
            return Err(KnowledgeError::InvalidRange {
                parameter,
                message: "bounds must be finite numbers".to_string(),
            });
        }
        if low > high {
            return Err(KnowledgeError::InvalidRange {
                parameter,
                message: format!("low bound {low} is above high bound {high}"),
            });
        }
        Ok(Self {
            parameter,
            unit: unit.into(),
            low,
            high,
        })
    }
}

/// Reference ranges keyed by canonical display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeTable {
    ranges: BTreeMap<String, ReferenceRange>,
}

impl RangeTable {
    pub fn from_ranges(ranges: Vec<ReferenceRange>) -> Result<Self, KnowledgeError> {
        let mut table = BTreeMap::new();
        for range in ranges {
            if table.contains_key(&range.parameter) {
                return Err(KnowledgeError::InvalidRange {
                    parameter: range.parameter,
                    message: "duplicate entry".to_string(),
                });
            }
            table.insert(range.parameter.clone(), range);
        }
        Ok(Self { ranges: table })
    }

    pub fn get(&self, parameter: &str) -> Option<&ReferenceRange> {
        self.ranges.get(parameter)
    }

    pub fn contains(&self, parameter: &str) -> bool {
        self.ranges.contains_key(parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRange> {
        self.ranges.values()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Parse `ranges.csv` (`Parameter,Unit,Low,High`).
pub fn parse_ranges_csv(bytes: &[u8], path: &Path) -> Result<RangeTable, KnowledgeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| KnowledgeError::csv(path, e.to_string()))?
        .clone();

    let mut ranges = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| KnowledgeError::csv(path, e.to_string()))?;

        let get = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}') == name)
                .and_then(|i| row.get(i))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        let parameter =
            get("Parameter").ok_or_else(|| KnowledgeError::csv(path, "missing Parameter"))?;
        let bound = |name: &str| -> Result<f64, KnowledgeError> {
            let raw = get(name).ok_or_else(|| KnowledgeError::InvalidRange {
                parameter: parameter.clone(),
                message: format!("missing {name} bound"),
            })?;
            raw.parse::<f64>().map_err(|_| KnowledgeError::InvalidRange {
                parameter: parameter.clone(),
                message: format!("{name} bound '{raw}' is not a number"),
            })
        };
        let low = bound("Low")?;
        let high = bound("High")?;

        ranges.push(ReferenceRange::new(
            parameter.clone(),
            get("Unit").unwrap_or_default(),
            low,
            high,
        )?);
    }

    RangeTable::from_ranges(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<RangeTable, KnowledgeError> {
        parse_ranges_csv(csv.as_bytes(), Path::new("ranges.csv"))
    }

    #[test]
    fn parses_rows() {
        let table = parse("Parameter,Unit,Low,High\nCreatinine,mg/dL,0.6,1.3\nWBC,,4000,11000\n")
            .unwrap();
        assert_eq!(table.len(), 2);
        let creatinine = table.get("Creatinine").unwrap();
        assert_eq!(creatinine.unit, "mg/dL");
        assert_eq!((creatinine.low, creatinine.high), (0.6, 1.3));
        assert_eq!(table.get("WBC").unwrap().unit, "");
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = parse("Parameter,Unit,Low,High\nSGOT,U/L,40,10\n").unwrap_err();
        assert!(matches!(err, KnowledgeError::InvalidRange { ref parameter, .. } if parameter == "SGOT"));
    }

    #[test]
    fn rejects_non_numeric_bound() {
        let err = parse("Parameter,Unit,Low,High\nSGOT,U/L,ten,40\n").unwrap_err();
        assert!(err.to_string().contains("is not a number"));
    }

    #[test]
    fn rejects_duplicate_parameter() {
        let err = parse("Parameter,Unit,Low,High\nWBC,,1,2\nWBC,,3,4\n").unwrap_err();
        assert!(err.to_string().contains("duplicate entry"));
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let range = ReferenceRange::new("X", "", 1.0, 1.0).unwrap();
        assert_eq!(range.low, range.high);
    }
}
