//! The analysis pipeline.

use std::fmt;
use std::sync::Arc;

use lab_extract::LineExtractor;
use lab_knowledge::KnowledgeBase;
use lab_model::{AnalysisReport, ExtractionOutcome, ParameterValues, Result, ensure_finite};
use lab_validate::{DiseaseRuleEngine, evaluate};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::predictor::{RiskPredictor, ThresholdRiskPredictor};

/// Extraction outcome and the report built from its values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub extraction: ExtractionOutcome,
    pub report: AnalysisReport,
}

/// Runs extraction, range evaluation, risk prediction and disease inference
/// against one knowledge base.
///
/// Holds no per-request state; a single instance can serve many threads.
pub struct Analyzer {
    knowledge: Arc<KnowledgeBase>,
    predictor: Box<dyn RiskPredictor>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("knowledge", &self.knowledge.source())
            .field("predictor", &self.predictor.name())
            .finish()
    }
}

impl Analyzer {
    /// Analyzer with the threshold predictor over the knowledge base ranges.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        let predictor = ThresholdRiskPredictor::from_knowledge(&knowledge);
        Self {
            knowledge,
            predictor: Box::new(predictor),
        }
    }

    /// Replace the risk predictor.
    pub fn with_predictor(mut self, predictor: impl RiskPredictor + 'static) -> Self {
        self.predictor = Box::new(predictor);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Scan OCR text for parameter values.
    pub fn extract(&self, text: &str) -> ExtractionOutcome {
        let _span = info_span!("extract", bytes = text.len()).entered();
        LineExtractor::new(self.knowledge.synonyms()).extract_outcome(text)
    }

    /// Build the full report for `values`.
    ///
    /// Fails only when a value is NaN or infinite.
    pub fn analyze(&self, values: &ParameterValues) -> Result<AnalysisReport> {
        let _span = info_span!("analyze", parameters = values.len()).entered();
        ensure_finite(values)?;

        let comparison = evaluate(values, self.knowledge.ranges());
        let prediction = self.predictor.predict(values);
        debug!(
            predictor = self.predictor.name(),
            overall_risk = %prediction.overall_risk,
            risks = prediction.risks.len(),
            "risk prediction complete"
        );
        let diseases = DiseaseRuleEngine::new(self.knowledge.diseases()).infer(values);

        let report = AnalysisReport {
            comparison,
            prediction,
            diseases,
        };
        info!(
            parameters = report.comparison.len(),
            abnormal = report.abnormal_parameters().len(),
            diseases = report.diseases.possible_diseases.len(),
            "analysis complete"
        );
        Ok(report)
    }

    /// Extract values from `text` and analyze them.
    pub fn analyze_text(&self, text: &str) -> Result<TextAnalysis> {
        let extraction = self.extract(text);
        let report = self.analyze(&extraction.values)?;
        Ok(TextAnalysis { extraction, report })
    }
}
