//! Disease rule engine.
//!
//! Each signature is scored by the share of its indicators that hold, scaled
//! by the signature weight. Signatures scoring below [`MIN_CONFIDENCE`] are
//! not reported.

use lab_knowledge::DiseaseSignature;
use lab_model::{
    DiseaseMatch, DiseaseReport, MatchedIndicator, ParameterValues, PossibleDiseases, RiskLevel,
};
use tracing::{debug, trace};

use crate::summary::summarize;

/// Lowest confidence at which a disease is reported.
pub const MIN_CONFIDENCE: f64 = 50.0;

/// `weight * matched / total`, clamped to 0-100 and rounded to one decimal.
pub fn confidence(weight: f64, matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (weight * matched as f64 / total as f64).clamp(0.0, 100.0);
    (raw * 10.0).round() / 10.0
}

/// Evaluates disease signatures against parameter values.
#[derive(Debug, Clone, Copy)]
pub struct DiseaseRuleEngine<'a> {
    signatures: &'a [DiseaseSignature],
}

impl<'a> DiseaseRuleEngine<'a> {
    pub fn new(signatures: &'a [DiseaseSignature]) -> Self {
        Self { signatures }
    }

    /// Ranked matches and a summary line.
    pub fn infer(&self, values: &ParameterValues) -> DiseaseReport {
        let matches: Vec<DiseaseMatch> = self
            .signatures
            .iter()
            .filter_map(|signature| score(signature, values))
            .collect();
        let possible_diseases = PossibleDiseases::ranked(matches);

        debug!(
            signatures = self.signatures.len(),
            reported = possible_diseases.len(),
            top = possible_diseases.top().map(|m| m.name.as_str()),
            "disease inference complete"
        );

        DiseaseReport {
            summary: summarize(&possible_diseases),
            possible_diseases,
        }
    }
}

/// Score one signature. `None` when it is below the reporting cutoff.
fn score(signature: &DiseaseSignature, values: &ParameterValues) -> Option<DiseaseMatch> {
    let matched_indicators: Vec<MatchedIndicator> = signature
        .indicators
        .iter()
        .filter_map(|indicator| {
            let value = *values.get(&indicator.parameter)?;
            indicator.holds(value).then(|| MatchedIndicator {
                parameter: indicator.parameter.clone(),
                value,
                condition: indicator.to_string(),
            })
        })
        .collect();

    if matched_indicators.is_empty() {
        return None;
    }

    let confidence = confidence(
        signature.weight,
        matched_indicators.len(),
        signature.indicators.len(),
    );
    trace!(
        disease = %signature.name,
        matched = matched_indicators.len(),
        total = signature.indicators.len(),
        confidence,
        "signature scored"
    );
    if confidence < MIN_CONFIDENCE {
        return None;
    }

    Some(DiseaseMatch {
        name: signature.name.clone(),
        confidence,
        risk_level: RiskLevel::from_confidence(confidence),
        matched_indicators,
        symptoms: signature.symptoms.clone(),
        description: signature.description.clone(),
        recommendation: signature.recommendation.clone(),
    })
}

/// Shorthand for [`DiseaseRuleEngine::infer`].
pub fn infer(values: &ParameterValues, signatures: &[DiseaseSignature]) -> DiseaseReport {
    DiseaseRuleEngine::new(signatures).infer(values)
}

#[cfg(test)]
mod tests {
    use lab_knowledge::{Condition, Indicator};

    use super::*;

    fn signature(name: &str, weight: f64, indicators: &[(&str, Condition)]) -> DiseaseSignature {
        DiseaseSignature {
            name: name.to_string(),
            indicators: indicators
                .iter()
                .map(|(parameter, condition)| Indicator {
                    parameter: parameter.to_string(),
                    condition: *condition,
                })
                .collect(),
            symptoms: vec!["Fatigue".to_string()],
            weight,
            description: format!("{name} description"),
            recommendation: format!("{name} recommendation"),
        }
    }

    fn values(pairs: &[(&str, f64)]) -> ParameterValues {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn policy_constants_are_pinned() {
        assert_eq!(MIN_CONFIDENCE, 50.0);
        assert_eq!(lab_model::MEDIUM_RISK_THRESHOLD, 60.0);
        assert_eq!(lab_model::HIGH_RISK_THRESHOLD, 80.0);
    }

    #[test]
    fn confidence_is_scaled_clamped_and_rounded() {
        assert_eq!(confidence(90.0, 2, 2), 90.0);
        assert_eq!(confidence(90.0, 1, 2), 45.0);
        assert_eq!(confidence(80.0, 2, 3), 53.3);
        assert_eq!(confidence(100.0, 1, 3), 33.3);
        assert_eq!(confidence(150.0, 1, 1), 100.0);
        assert_eq!(confidence(-5.0, 1, 1), 0.0);
        assert_eq!(confidence(90.0, 0, 0), 0.0);
    }

    #[test]
    fn absent_parameter_is_unmatched_not_fatal() {
        let signatures = vec![signature(
            "Kidney",
            90.0,
            &[
                ("Creatinine", Condition::GreaterThan(1.3)),
                ("Urea", Condition::GreaterThan(40.0)),
            ],
        )];
        let report = infer(&values(&[("Creatinine", 2.0)]), &signatures);
        // 90 * 1/2 = 45, below the cutoff
        assert!(report.possible_diseases.is_empty());
    }

    #[test]
    fn cutoff_is_inclusive() {
        let signatures = vec![signature(
            "Edge",
            100.0,
            &[
                ("A", Condition::GreaterThan(1.0)),
                ("B", Condition::GreaterThan(1.0)),
            ],
        )];
        let report = infer(&values(&[("A", 2.0)]), &signatures);
        let edge = report.possible_diseases.get("Edge").unwrap();
        assert_eq!(edge.confidence, 50.0);
        assert_eq!(edge.risk_level, RiskLevel::Low);
    }

    #[test]
    fn matched_indicators_are_exactly_those_that_held() {
        let signatures = vec![signature(
            "Liver",
            90.0,
            &[
                ("SGPT", Condition::GreaterThan(56.0)),
                ("SGOT", Condition::GreaterThan(40.0)),
                ("Bilirubin", Condition::GreaterThan(1.2)),
            ],
        )];
        let report = infer(
            &values(&[("SGPT", 80.0), ("SGOT", 35.0), ("Bilirubin", 2.0)]),
            &signatures,
        );
        let liver = report.possible_diseases.get("Liver").unwrap();
        assert_eq!(liver.confidence, 60.0);
        assert_eq!(liver.risk_level, RiskLevel::Medium);
        let conditions: Vec<&str> = liver
            .matched_indicators
            .iter()
            .map(|m| m.condition.as_str())
            .collect();
        assert_eq!(conditions, vec!["SGPT > 56", "Bilirubin > 1.2"]);
        assert_eq!(liver.matched_indicators[1].value, 2.0);
        assert_eq!(liver.symptoms, vec!["Fatigue"]);
        assert_eq!(liver.recommendation, "Liver recommendation");
    }

    #[test]
    fn empty_values_give_clean_report() {
        let signatures = vec![signature("X", 90.0, &[("A", Condition::LessThan(1.0))])];
        let report = infer(&ParameterValues::new(), &signatures);
        assert!(report.possible_diseases.is_empty());
        assert_eq!(report.summary, crate::summary::CLEAN_SUMMARY);
    }
}
