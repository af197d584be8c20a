//! Deterministic flood risk scoring.
//!
//! A score is the sum of two bucket lookups: rainfall contributes 10-60
//! points and elevation 5-40 points, so every result lands in [15, 100].
//! The scorer is a pure function and safe to call from any thread.
//!
//! ```rust
//! use floodcast::risk::{score, Severity};
//!
//! let result = score(35.2, 12.3);
//! assert_eq!(result.rainfall_points, 50.0);
//! assert_eq!(result.elevation_points, 30.0);
//! assert_eq!(result.risk_score.value(), 80.0);
//! assert_eq!(result.severity, Severity::Critical);
//! ```

pub mod buckets;
pub mod explanation;
pub mod score_types;
pub mod severity;

pub use buckets::{Bucket, Factor, ELEVATION_BUCKETS, RAINFALL_BUCKETS};
pub use explanation::{Explanation, FactorLevel};
pub use score_types::RiskScore;
pub use severity::Severity;

use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Readings fed to the scorer. Absent or `null` fields deserialize as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringInput {
    #[serde(default, deserialize_with = "missing_as_zero")]
    pub rainfall_mm: f64,
    #[serde(default, deserialize_with = "missing_as_zero")]
    pub elevation_m: f64,
}

fn missing_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl ScoringInput {
    pub fn new(rainfall_mm: f64, elevation_m: f64) -> Self {
        Self {
            rainfall_mm,
            elevation_m,
        }
    }

    pub fn score(&self) -> ScoringResult {
        score(self.rainfall_mm, self.elevation_m)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub risk_score: RiskScore,
    pub severity: Severity,
    pub rainfall_points: f64,
    pub elevation_points: f64,
    /// Factor name (`rainfall`, `elevation`) to qualitative label.
    pub explanation: BTreeMap<String, String>,
    pub summary: String,
}

/// Score a pair of readings. Never fails: negative, NaN or otherwise
/// unusable readings fall into the lowest bucket of their table.
pub fn score(rainfall_mm: f64, elevation_m: f64) -> ScoringResult {
    let rainfall_points = buckets::rainfall_points(rainfall_mm);
    let elevation_points = buckets::elevation_points(elevation_m);

    // Table maxima sum to exactly 100; RiskScore holds the bound.
    let risk_score = RiskScore::new(rainfall_points + elevation_points);
    let severity = Severity::from_score(risk_score);

    let Explanation { factors, summary } =
        explanation::explain(rainfall_points, elevation_points, severity);

    ScoringResult {
        risk_score,
        severity,
        rainfall_points,
        elevation_points,
        explanation: factors,
        summary,
    }
}

/// Score many inputs in parallel. Output order matches input order.
pub fn score_batch(inputs: &[ScoringInput]) -> Vec<ScoringResult> {
    inputs.par_iter().map(ScoringInput::score).collect()
}
