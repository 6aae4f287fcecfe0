//! Integration tests for the shared report types.

use lab_model::{DiseaseMatch, PossibleDiseases, RiskLevel};
use proptest::prelude::*;

fn disease(name: String, confidence: f64) -> DiseaseMatch {
    DiseaseMatch {
        name,
        confidence,
        risk_level: RiskLevel::from_confidence(confidence),
        matched_indicators: vec![],
        symptoms: vec![],
        description: String::new(),
        recommendation: String::new(),
    }
}

proptest! {
    #[test]
    fn ranked_diseases_are_ordered(
        entries in prop::collection::vec(("[A-Z][a-z]{0,6}", 0u32..=100u32), 0..12)
    ) {
        let matches = entries
            .into_iter()
            .map(|(name, score)| disease(name, f64::from(score)))
            .collect();
        let ranked = PossibleDiseases::ranked(matches);
        let items: Vec<&DiseaseMatch> = ranked.iter().collect();
        for pair in items.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.confidence >= b.confidence);
            if a.confidence == b.confidence {
                prop_assert!(a.name <= b.name);
            }
        }
    }

    #[test]
    fn risk_level_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(RiskLevel::from_confidence(low) <= RiskLevel::from_confidence(high));
    }
}
