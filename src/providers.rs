//! Where rainfall and elevation readings come from.
//!
//! Readings are resolved in order: an explicit override, then the configured
//! provider, then the unavailable sentinel. The sentinel is always 0.0 and is
//! flagged, never a guessed or randomized value.

use crate::geo::Coordinates;
use crate::risk::{self, ScoringResult};
use serde::{Deserialize, Serialize};

pub trait RainfallProvider {
    fn rainfall_mm(&self, location: &Coordinates) -> Option<f64>;
}

pub trait ElevationProvider {
    fn elevation_m(&self, location: &Coordinates) -> Option<f64>;
}

/// Answers every location with the same configured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProvider(pub f64);

impl RainfallProvider for FixedProvider {
    fn rainfall_mm(&self, _location: &Coordinates) -> Option<f64> {
        Some(self.0)
    }
}

impl ElevationProvider for FixedProvider {
    fn elevation_m(&self, _location: &Coordinates) -> Option<f64> {
        Some(self.0)
    }
}

/// No data source configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnavailableProvider;

impl RainfallProvider for UnavailableProvider {
    fn rainfall_mm(&self, _location: &Coordinates) -> Option<f64> {
        None
    }
}

impl ElevationProvider for UnavailableProvider {
    fn elevation_m(&self, _location: &Coordinates) -> Option<f64> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    Override,
    Provider,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub source: ReadingSource,
}

impl Reading {
    pub const SENTINEL: f64 = 0.0;

    pub fn overridden(value: f64) -> Self {
        Self {
            value,
            source: ReadingSource::Override,
        }
    }

    pub fn provided(value: f64) -> Self {
        Self {
            value,
            source: ReadingSource::Provider,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            value: Self::SENTINEL,
            source: ReadingSource::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.source != ReadingSource::Unavailable
    }

    /// Value to persist; unavailable readings are stored as absent.
    pub fn recorded(&self) -> Option<f64> {
        self.is_available().then_some(self.value)
    }

    fn resolve(override_value: Option<f64>, provided: impl FnOnce() -> Option<f64>) -> Self {
        match override_value {
            Some(value) => Self::overridden(value),
            None => provided().map(Self::provided).unwrap_or_else(Self::unavailable),
        }
    }
}

/// Caller-supplied values that bypass the providers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub rainfall_mm: Option<f64>,
    pub elevation_m: Option<f64>,
}

/// Provider pair used to fill in readings that weren't overridden.
pub struct Providers {
    pub rainfall: Box<dyn RainfallProvider + Send + Sync>,
    pub elevation: Box<dyn ElevationProvider + Send + Sync>,
}

impl Providers {
    pub fn new(
        rainfall: impl RainfallProvider + Send + Sync + 'static,
        elevation: impl ElevationProvider + Send + Sync + 'static,
    ) -> Self {
        Self {
            rainfall: Box::new(rainfall),
            elevation: Box::new(elevation),
        }
    }

    /// Fixed providers where a value is configured, unavailable otherwise.
    pub fn from_defaults(rainfall_mm: Option<f64>, elevation_m: Option<f64>) -> Self {
        let rainfall: Box<dyn RainfallProvider + Send + Sync> = match rainfall_mm {
            Some(v) => Box::new(FixedProvider(v)),
            None => Box::new(UnavailableProvider),
        };
        let elevation: Box<dyn ElevationProvider + Send + Sync> = match elevation_m {
            Some(v) => Box::new(FixedProvider(v)),
            None => Box::new(UnavailableProvider),
        };
        Self {
            rainfall,
            elevation,
        }
    }
}

impl Default for Providers {
    fn default() -> Self {
        Self::new(UnavailableProvider, UnavailableProvider)
    }
}

/// A scored location together with the readings that produced the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub location: Coordinates,
    pub location_name: Option<String>,
    pub rainfall: Reading,
    pub elevation: Reading,
    pub result: ScoringResult,
}

impl Assessment {
    pub fn has_missing_data(&self) -> bool {
        !self.rainfall.is_available() || !self.elevation.is_available()
    }
}

pub fn assess(
    location: Coordinates,
    location_name: Option<String>,
    overrides: Overrides,
    providers: &Providers,
) -> Assessment {
    let rainfall = Reading::resolve(overrides.rainfall_mm, || {
        providers.rainfall.rainfall_mm(&location)
    });
    let elevation = Reading::resolve(overrides.elevation_m, || {
        providers.elevation.elevation_m(&location)
    });

    if !rainfall.is_available() {
        log::warn!("Rainfall data unavailable for {}; scoring with 0 mm", location);
    }
    if !elevation.is_available() {
        log::warn!("Elevation data unavailable for {}; scoring with 0 m", location);
    }

    let result = risk::score(rainfall.value, elevation.value);
    log::debug!(
        "Assessed {}: {} ({})",
        location,
        result.risk_score,
        result.severity
    );

    Assessment {
        location,
        location_name,
        rainfall,
        elevation,
        result,
    }
}
