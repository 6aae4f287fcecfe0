//! Evaluation of parameter values against the knowledge base.
//!
//! - [`evaluate`] classifies each value as Low, Normal, High or Unknown.
//! - [`DiseaseRuleEngine`] scores disease signatures and ranks the matches.

pub mod engine;
pub mod ranges;
pub mod summary;

pub use engine::{DiseaseRuleEngine, MIN_CONFIDENCE, confidence, infer};
pub use ranges::{classify, compare, evaluate};
pub use summary::{CLEAN_SUMMARY, summarize};
