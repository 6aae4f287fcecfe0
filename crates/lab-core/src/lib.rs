//! Blood report analysis.
//!
//! [`Analyzer`] ties the pipeline together: OCR text is scanned into
//! canonical values, then each value is compared with its reference range,
//! a [`RiskPredictor`] assigns an overall risk, and disease signatures are
//! scored. The three evaluations are independent of each other.
//!
//! ```ignore
//! use std::sync::Arc;
//! use lab_core::Analyzer;
//! use lab_knowledge::KnowledgeBase;
//!
//! let analyzer = Analyzer::new(Arc::new(KnowledgeBase::builtin()?));
//! let analysis = analyzer.analyze_text("Hemoglobin: 9.0\nCreatinine: 2.1")?;
//! ```

pub mod analyzer;
pub mod predictor;

pub use analyzer::{Analyzer, TextAnalysis};
pub use predictor::{FnPredictor, RiskPredictor, ThresholdRiskPredictor, overall_risk};
