pub mod comparison;
pub mod disease;
pub mod enums;
pub mod error;
pub mod extraction;
pub mod prediction;
pub mod report;
pub mod values;

pub use comparison::{ComparisonResult, NOT_AVAILABLE, NormalRange};
pub use disease::{DiseaseMatch, DiseaseReport, MatchedIndicator, PossibleDiseases};
pub use enums::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskLevel, Status};
pub use error::{LabError, Result};
pub use extraction::{DiscardReason, DiscardedLine, ExtractionOutcome};
pub use prediction::RiskPrediction;
pub use report::AnalysisReport;
pub use values::{ParameterValues, ensure_finite, values_from_json};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn report_serializes_in_api_shape() {
        let mut comparison = BTreeMap::new();
        comparison.insert(
            "Hemoglobin".to_string(),
            ComparisonResult {
                value: 9.0,
                unit: "g/dL".to_string(),
                status: Status::Low,
                normal_range: NormalRange::Bounds {
                    low: 12.0,
                    high: 17.5,
                },
            },
        );
        let report = AnalysisReport {
            comparison,
            prediction: RiskPrediction::low(),
            diseases: DiseaseReport::default(),
        };
        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["comparison"]["Hemoglobin"]["status"], "Low");
        assert_eq!(json["prediction"]["overall_risk"], "Low");
        assert!(json["diseases"]["possible_diseases"].as_object().unwrap().is_empty());
        assert_eq!(report.abnormal_parameters(), vec!["Hemoglobin"]);
    }

    #[test]
    fn discard_reasons_are_tagged() {
        let outcome = ExtractionOutcome {
            values: ParameterValues::new(),
            lines_scanned: 2,
            discarded: vec![
                DiscardedLine {
                    line_number: 1,
                    reason: DiscardReason::NoPattern,
                },
                DiscardedLine {
                    line_number: 2,
                    reason: DiscardReason::UnrecognizedLabel {
                        label: "Cholesterol".to_string(),
                        suggestion: None,
                    },
                },
            ],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["discarded"][0]["reason"]["kind"], "no_pattern");
        assert_eq!(json["discarded"][1]["reason"]["kind"], "unrecognized_label");
        assert!(json["discarded"][1]["reason"].get("suggestion").is_none());
        assert_eq!(outcome.discarded_count(), 2);
        assert_eq!(outcome.unrecognized_labels().collect::<Vec<_>>(), vec!["Cholesterol"]);
    }
}
