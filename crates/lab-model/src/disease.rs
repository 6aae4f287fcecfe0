//! Disease inference results.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::enums::RiskLevel;

/// An indicator condition that held for the submitted values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedIndicator {
    pub parameter: String,
    pub value: f64,
    /// Human-readable condition, e.g. `Creatinine > 1.3`.
    pub condition: String,
}

/// A disease signature that scored at or above the reporting cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseMatch {
    /// Disease name; emitted as the map key, not as a field.
    #[serde(skip)]
    pub name: String,
    /// Confidence in percent, 0 to 100.
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub matched_indicators: Vec<MatchedIndicator>,
    pub symptoms: Vec<String>,
    pub description: String,
    pub recommendation: String,
}

/// Ranked disease matches.
///
/// Kept as a vector so the ranking survives serialization: the JSON form is
/// an object keyed by disease name, in rank order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PossibleDiseases(Vec<DiseaseMatch>);

impl PossibleDiseases {
    /// Rank by descending confidence, then ascending name.
    pub fn ranked(mut matches: Vec<DiseaseMatch>) -> Self {
        matches.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.name.cmp(&b.name))
        });
        Self(matches)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Highest ranked match.
    pub fn top(&self) -> Option<&DiseaseMatch> {
        self.0.first()
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseMatch> {
        self.0.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiseaseMatch> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a PossibleDiseases {
    type Item = &'a DiseaseMatch;
    type IntoIter = std::slice::Iter<'a, DiseaseMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for PossibleDiseases {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for item in &self.0 {
            map.serialize_entry(&item.name, item)?;
        }
        map.end()
    }
}

/// Output of the disease rule engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiseaseReport {
    pub summary: String,
    pub possible_diseases: PossibleDiseases,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disease(name: &str, confidence: f64) -> DiseaseMatch {
        DiseaseMatch {
            name: name.to_string(),
            confidence,
            risk_level: RiskLevel::from_confidence(confidence),
            matched_indicators: vec![],
            symptoms: vec![],
            description: String::new(),
            recommendation: String::new(),
        }
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let ranked = PossibleDiseases::ranked(vec![
            disease("Leukopenia", 70.0),
            disease("Anemia", 85.0),
            disease("Infection", 70.0),
        ]);
        assert_eq!(ranked.names(), vec!["Anemia", "Infection", "Leukopenia"]);
        assert_eq!(ranked.top().map(|m| m.name.as_str()), Some("Anemia"));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let ranked = PossibleDiseases::ranked(vec![disease("B", 60.0), disease("A", 90.0)]);
        let json = serde_json::to_string(&ranked).unwrap();
        let a = json.find("\"A\"").unwrap();
        let b = json.find("\"B\"").unwrap();
        assert!(a < b);
        assert!(!json.contains("\"name\""));
    }
}
