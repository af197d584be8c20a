//! Qualitative labels attached to each scoring factor.
//!
//! Labels are read off the points a factor earned, never recomputed from the
//! raw reading, so the explanation can't disagree with the score.

use super::buckets::Factor;
use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse level of a single factor's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorLevel {
    Low,
    Moderate,
    High,
}

impl FactorLevel {
    /// 50+ points is high, 20-35 moderate, the 10-point bucket low.
    pub fn from_rainfall_points(points: f64) -> Self {
        if points >= 50.0 {
            FactorLevel::High
        } else if points >= 20.0 {
            FactorLevel::Moderate
        } else {
            FactorLevel::Low
        }
    }

    /// 30+ points is high, 20 moderate, 10 or fewer low.
    pub fn from_elevation_points(points: f64) -> Self {
        if points >= 30.0 {
            FactorLevel::High
        } else if points >= 20.0 {
            FactorLevel::Moderate
        } else {
            FactorLevel::Low
        }
    }

    fn word(self) -> &'static str {
        match self {
            FactorLevel::Low => "low",
            FactorLevel::Moderate => "moderate",
            FactorLevel::High => "high",
        }
    }

    pub fn label(self, factor: Factor) -> String {
        match factor {
            Factor::Rainfall => format!("{} contribution", self.word()),
            Factor::Elevation => format!("{} risk", self.word()),
        }
    }
}

/// Per-factor labels plus a one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub factors: BTreeMap<String, String>,
    pub summary: String,
}

pub fn explain(rainfall_points: f64, elevation_points: f64, severity: Severity) -> Explanation {
    let rainfall = FactorLevel::from_rainfall_points(rainfall_points);
    let elevation = FactorLevel::from_elevation_points(elevation_points);

    let mut factors = BTreeMap::new();
    factors.insert(Factor::Rainfall.name().to_string(), rainfall.label(Factor::Rainfall));
    factors.insert(Factor::Elevation.name().to_string(), elevation.label(Factor::Elevation));

    Explanation {
        factors,
        summary: summarize(rainfall, elevation, severity),
    }
}

fn summarize(rainfall: FactorLevel, elevation: FactorLevel, severity: Severity) -> String {
    let overall = match severity {
        Severity::Low => "low",
        Severity::Medium => "moderate",
        Severity::High | Severity::Critical => "elevated",
    };
    let rain = match rainfall {
        FactorLevel::Low => "light",
        FactorLevel::Moderate => "moderate",
        FactorLevel::High => "heavy",
    };
    // Elevation risk is inverse to the ground height it describes.
    let ground = match elevation {
        FactorLevel::Low => "high",
        FactorLevel::Moderate => "moderate",
        FactorLevel::High => "low",
    };
    format!(
        "Risk is {} due to {} rainfall and {} elevation.",
        overall, rain, ground
    )
}
