//! Classification enums shared by the evaluators and the report.
//!
//! Both enums serialize with their display spelling ("Low", "Normal", ...)
//! so the JSON report reads the same as the terminal table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence at or above which a disease match is reported as Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 60.0;

/// Confidence at or above which a disease match is reported as High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 80.0;

/// Position of a measured value relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Below the low bound.
    Low,
    /// Within the range, bounds included.
    Normal,
    /// Above the high bound.
    High,
    /// No reference range is configured, or the value cannot be ordered.
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Low => "Low",
            Status::Normal => "Normal",
            Status::High => "High",
            Status::Unknown => "Unknown",
        }
    }

    /// Returns true for Low and High.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Status::Low | Status::High)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" | "L" => Ok(Status::Low),
            "NORMAL" | "N" => Ok(Status::Normal),
            "HIGH" | "H" => Ok(Status::High),
            "UNKNOWN" => Ok(Status::Unknown),
            _ => Err(format!("Unknown status: {s}")),
        }
    }
}

/// Coarse risk band used for disease matches and the overall prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band a 0-100 confidence score.
    ///
    /// - below 60: Low
    /// - 60 up to (not including) 80: Medium
    /// - 80 and above: High
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if confidence >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" | "MODERATE" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_are_pinned() {
        assert_eq!(RiskLevel::from_confidence(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(59.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(60.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(79.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(80.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_confidence(100.0), RiskLevel::High);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("low".parse::<Status>(), Ok(Status::Low));
        assert_eq!(" High ".parse::<Status>(), Ok(Status::High));
        assert!("borderline".parse::<Status>().is_err());
    }

    #[test]
    fn only_low_and_high_are_abnormal() {
        assert!(Status::Low.is_abnormal());
        assert!(Status::High.is_abnormal());
        assert!(!Status::Normal.is_abnormal());
        assert!(!Status::Unknown.is_abnormal());
    }
}
