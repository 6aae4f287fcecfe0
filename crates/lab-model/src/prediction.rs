use serde::{Deserialize, Serialize};

use crate::enums::RiskLevel;

/// Output of a risk predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub overall_risk: RiskLevel,
    /// Identified risks, most specific first.
    pub risks: Vec<String>,
}

impl RiskPrediction {
    /// Prediction with no identified risks.
    pub fn low() -> Self {
        Self {
            overall_risk: RiskLevel::Low,
            risks: Vec::new(),
        }
    }
}
