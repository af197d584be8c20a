//! Type-safe score scale for flood risk.
//!
//! Scores live on a 0-100 scale. Encoding the bound in the type means a
//! value that escaped the range can never reach severity classification or
//! the store.
//!
//! # Examples
//!
//! ```rust
//! use floodcast::risk::score_types::RiskScore;
//!
//! let score = RiskScore::new(80.0);
//! assert_eq!(score.value(), 80.0);
//!
//! // Out-of-bounds values are clamped
//! let clamped = RiskScore::new(150.0);
//! assert_eq!(clamped.value(), 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flood risk score on a 0-100 scale.
///
/// Values are automatically clamped to the [0.0, 100.0] range. NaN collapses
/// to 0.0 so the lowest severity is reported for unusable input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0.0);
    pub const MAX: RiskScore = RiskScore(100.0);

    /// Create a new score, clamping to [0.0, 100.0].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use floodcast::risk::score_types::RiskScore;
    /// assert_eq!(RiskScore::new(-5.0).value(), 0.0);
    /// assert_eq!(RiskScore::new(f64::NAN).value(), 0.0);
    /// ```
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Get the raw score value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for RiskScore {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<f64> for RiskScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
