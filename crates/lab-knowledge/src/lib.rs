#![deny(unsafe_code)]

//! Static clinical tables for blood report analysis.
//!
//! A knowledge directory holds three tables pinned by `manifest.toml`:
//!
//! - **synonyms.toml**: ordered label vocabulary and display names
//! - **ranges.csv**: reference range and unit per parameter
//! - **diseases.toml**: disease signatures (indicator conditions, weight, advice)
//!
//! [`KnowledgeBase::load`] verifies every pinned sha256 before parsing;
//! [`KnowledgeBase::builtin`] parses the copies compiled into the crate.

pub mod diseases;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod ranges;
pub mod registry;
pub mod synonyms;

pub use crate::diseases::{Condition, DiseaseSignature, Indicator};
pub use crate::error::KnowledgeError;
pub use crate::paths::{KNOWLEDGE_ENV_VAR, knowledge_root};
pub use crate::ranges::{RangeTable, ReferenceRange};
pub use crate::registry::{ConsistencyNote, KnowledgeBase, KnowledgeSource, KnowledgeSummary};
pub use crate::synonyms::{SynonymEntry, SynonymTable};
