//! Risk predictors.
//!
//! A predictor turns canonical values into an overall risk band and a list of
//! risk statements. It runs alongside the disease rule engine and neither
//! sees the other's output.

use lab_knowledge::{KnowledgeBase, RangeTable};
use lab_model::{ParameterValues, RiskLevel, RiskPrediction, Status};
use lab_validate::classify;

/// Produces a [`RiskPrediction`] from parameter values.
pub trait RiskPredictor: Send + Sync {
    fn predict(&self, values: &ParameterValues) -> RiskPrediction;

    /// Name for logging.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Parameters whose elevation is reported as a liver risk, in report order.
const LIVER_PARAMETERS: &[&str] = &["SGPT", "SGOT", "Bilirubin"];

/// Rule-based predictor over the reference ranges.
///
/// Covers three risk classes: anemia (low hemoglobin), kidney (high
/// creatinine) and liver (high SGPT, SGOT or bilirubin). Parameters that are
/// missing or have no range contribute nothing.
#[derive(Debug, Clone)]
pub struct ThresholdRiskPredictor {
    ranges: RangeTable,
}

impl ThresholdRiskPredictor {
    pub fn new(ranges: RangeTable) -> Self {
        Self { ranges }
    }

    pub fn from_knowledge(knowledge: &KnowledgeBase) -> Self {
        Self::new(knowledge.ranges().clone())
    }

    fn status(&self, values: &ParameterValues, parameter: &str) -> Status {
        match (values.get(parameter), self.ranges.get(parameter)) {
            (Some(value), Some(range)) => classify(*value, range),
            _ => Status::Unknown,
        }
    }
}

impl RiskPredictor for ThresholdRiskPredictor {
    fn predict(&self, values: &ParameterValues) -> RiskPrediction {
        let mut risks = Vec::new();

        if self.status(values, "Hemoglobin") == Status::Low {
            risks.push("Anemia risk: hemoglobin below normal range".to_string());
        }
        if self.status(values, "Creatinine") == Status::High {
            risks.push("Kidney risk: creatinine above normal range".to_string());
        }
        let elevated: Vec<&str> = LIVER_PARAMETERS
            .iter()
            .copied()
            .filter(|parameter| self.status(values, parameter) == Status::High)
            .collect();
        if !elevated.is_empty() {
            risks.push(format!("Liver risk: elevated {}", elevated.join(", ")));
        }

        RiskPrediction {
            overall_risk: overall_risk(risks.len()),
            risks,
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

/// Low with no risks, Medium with one, High with two or more.
pub fn overall_risk(risk_count: usize) -> RiskLevel {
    match risk_count {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Adapts a closure into a [`RiskPredictor`].
pub struct FnPredictor<F> {
    name: String,
    predict: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&ParameterValues) -> RiskPrediction + Send + Sync,
{
    pub fn new(name: impl Into<String>, predict: F) -> Self {
        Self {
            name: name.into(),
            predict,
        }
    }
}

impl<F> RiskPredictor for FnPredictor<F>
where
    F: Fn(&ParameterValues) -> RiskPrediction + Send + Sync,
{
    fn predict(&self, values: &ParameterValues) -> RiskPrediction {
        (self.predict)(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
