use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::risk::Severity;
use crate::store::subscriptions::DEFAULT_SUBSCRIPTION_RADIUS_KM;

/// Root configuration structure for floodcast
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FloodcastConfig {
    /// Event store location
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Fallback readings when a value isn't given on the command line
    #[serde(default)]
    pub providers: Option<ProvidersConfig>,

    /// Alert matching and dispatch
    #[serde(default)]
    pub alerts: Option<AlertsConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

/// Fixed readings used in place of a live data source. Leaving a value out
/// marks that reading as unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProvidersConfig {
    pub rainfall_mm: Option<f64>,
    pub elevation_m: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertsConfig {
    /// Notify matching subscribers when a High or Critical event is recorded
    #[serde(default = "default_auto_notify")]
    pub auto_notify: bool,

    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    #[serde(default = "default_min_severity")]
    pub default_min_severity: Severity,
}

pub fn default_auto_notify() -> bool {
    true
}

pub fn default_radius_km() -> f64 {
    DEFAULT_SUBSCRIPTION_RADIUS_KM
}

pub fn default_min_severity() -> Severity {
    Severity::Medium
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            auto_notify: default_auto_notify(),
            default_radius_km: default_radius_km(),
            default_min_severity: default_min_severity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
}

impl FloodcastConfig {
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store.as_ref().and_then(|s| s.path.clone())
    }

    pub fn providers(&self) -> ProvidersConfig {
        self.providers.clone().unwrap_or_default()
    }

    pub fn alerts(&self) -> AlertsConfig {
        self.alerts.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or_default()
    }

    /// Every problem with the values, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(providers) = &self.providers {
            for (name, value) in [
                ("providers.rainfall_mm", providers.rainfall_mm),
                ("providers.elevation_m", providers.elevation_m),
            ] {
                if let Some(v) = value {
                    if !v.is_finite() {
                        errors.push(format!("{}: must be a finite number (got {})", name, v));
                    }
                }
            }
        }

        if let Some(alerts) = &self.alerts {
            if !(alerts.default_radius_km.is_finite() && alerts.default_radius_km > 0.0) {
                errors.push(format!(
                    "alerts.default_radius_km: must be positive (got {})",
                    alerts.default_radius_km
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
