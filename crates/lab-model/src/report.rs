use std::collections::BTreeMap;

use serde::Serialize;

use crate::comparison::ComparisonResult;
use crate::disease::DiseaseReport;
use crate::prediction::RiskPrediction;

/// Combined analysis of one set of parameter values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub comparison: BTreeMap<String, ComparisonResult>,
    pub prediction: RiskPrediction,
    pub diseases: DiseaseReport,
}

impl AnalysisReport {
    /// Parameters outside their reference range.
    pub fn abnormal_parameters(&self) -> Vec<&str> {
        self.comparison
            .iter()
            .filter(|(_, result)| result.status.is_abnormal())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
