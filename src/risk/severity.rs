use super::score_types::RiskScore;
use crate::errors::FloodcastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal flood severity.
///
/// Ordering follows the variant order, so `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Lower bound (inclusive) of each severity above `Low`.
const MEDIUM_FLOOR: f64 = 26.0;
const HIGH_FLOOR: f64 = 51.0;
const CRITICAL_FLOOR: f64 = 76.0;

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Classify a score: [0,26) Low, [26,51) Medium, [51,76) High, [76,100] Critical.
    pub fn from_score(score: RiskScore) -> Self {
        let value = score.value();
        if value < MEDIUM_FLOOR {
            Severity::Low
        } else if value < HIGH_FLOOR {
            Severity::Medium
        } else if value < CRITICAL_FLOOR {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Whether an event at this severity reaches a subscriber's `threshold`.
    pub fn meets(self, threshold: Severity) -> bool {
        self >= threshold
    }

    /// High and Critical events notify subscribers as soon as they are recorded.
    pub fn is_alerting(self) -> bool {
        self >= Severity::High
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = FloodcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(FloodcastError::validation(format!(
                "unknown severity '{}' (expected low, medium, high or critical)",
                other
            ))),
        }
    }
}
