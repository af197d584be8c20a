//! `.floodcast.toml` configuration.
//!
//! The nearest file found by walking up from the working directory is used;
//! a broken discovered file logs a warning and falls back to defaults, while
//! a file passed with `--config` must load cleanly.

mod core;
mod loader;

pub use core::{
    default_auto_notify, default_min_severity, default_radius_km, AlertsConfig, FloodcastConfig,
    OutputConfig, ProvidersConfig, StoreConfig,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use std::path::PathBuf;

/// Store file used when neither the command line nor the config names one.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("floodcast").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("floodcast-events.json"))
}

/// Resolve the store path: explicit argument, then config, then default.
pub fn resolve_store_path(explicit: Option<PathBuf>, config: &FloodcastConfig) -> PathBuf {
    explicit
        .or_else(|| config.store_path())
        .unwrap_or_else(default_store_path)
}
