//! One-line report summary.

use lab_model::{DiseaseMatch, PossibleDiseases, RiskLevel};

/// Message used when no disease signature was reported.
pub const CLEAN_SUMMARY: &str =
    "No disease patterns detected. All evaluated parameters are consistent with a healthy profile.";

/// Summary sentence for a ranked disease list, driven by the top match.
pub fn summarize(diseases: &PossibleDiseases) -> String {
    match diseases.top() {
        Some(top) => summarize_match(top),
        None => CLEAN_SUMMARY.to_string(),
    }
}

fn summarize_match(top: &DiseaseMatch) -> String {
    let DiseaseMatch {
        name, confidence, ..
    } = top;
    match top.risk_level {
        RiskLevel::High => format!(
            "High risk: findings are most consistent with {name} ({confidence:.1}% confidence). \
             Medical consultation is recommended."
        ),
        RiskLevel::Medium => format!(
            "Moderate risk: findings suggest {name} ({confidence:.1}% confidence). \
             Follow up with a physician."
        ),
        RiskLevel::Low => format!(
            "Low risk: findings weakly suggest {name} ({confidence:.1}% confidence). \
             Monitor and retest."
        ),
    }
}
