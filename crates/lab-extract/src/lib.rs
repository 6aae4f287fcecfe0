//! Parameter extraction from OCR'd lab report text.
//!
//! [`LineExtractor`] scans text for `label: number` lines and resolves each
//! label through a [`KeyNormalizer`] backed by the knowledge base's synonym
//! table. Lines that cannot be used are recorded, not reported as errors.

pub mod extractor;
pub mod normalize;
pub mod numeric;
pub mod suggest;

pub use extractor::{LineExtractor, extract};
pub use normalize::{KeyNormalizer, clean_label, normalize};
pub use suggest::{SUGGESTION_THRESHOLD, suggest};
