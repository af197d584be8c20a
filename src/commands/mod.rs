//! Command handlers behind the `floodcast` subcommands.
//!
//! Each handler renders into memory with the selected [`OutputWriter`] and
//! then writes the finished report in one go, so a failing command never
//! leaves half a JSON document on stdout.

pub mod alerts;
pub mod assess;
pub mod batch;
pub mod events;
pub mod init;
pub mod score;
pub mod subscriptions;

use crate::cli::{Cli, LocationArgs};
use crate::config::{self, FloodcastConfig};
use crate::formatting::FormattingConfig;
use crate::geo::Coordinates;
use crate::io;
use crate::observability::{set_phase, Phase};
use crate::output::{create_writer, OutputFormat, OutputWriter};
use crate::providers::Providers;
use crate::store::EventStore;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings shared by every command, resolved once from flags and config.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: FloodcastConfig,
    pub store_path: PathBuf,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// `--config` must load cleanly; otherwise the nearest `.floodcast.toml`
    /// is used if it parses.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = {
            let _phase = set_phase(Phase::ConfigLoading);
            match &cli.config {
                Some(path) => config::load_config_from(path)?,
                None => config::load_config(),
            }
        };
        Ok(Self::new(
            config,
            cli.store.clone(),
            cli.format,
            cli.plain,
        ))
    }

    pub fn new(
        config: FloodcastConfig,
        store: Option<PathBuf>,
        format: Option<OutputFormat>,
        plain: bool,
    ) -> Self {
        let store_path = config::resolve_store_path(store, &config);
        let format = format.unwrap_or_else(|| config.default_format());
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        Self {
            config,
            store_path,
            format,
            formatting,
        }
    }

    pub fn open_store(&self) -> Result<EventStore> {
        let _phase = set_phase(Phase::StoreLoading);
        log::debug!("Using store {}", self.store_path.display());
        Ok(EventStore::open(&self.store_path)?)
    }

    pub fn save_store(&self, store: &EventStore) -> Result<()> {
        let _phase = set_phase(Phase::StoreWriting);
        Ok(store.save()?)
    }

    pub fn providers(&self) -> Providers {
        let providers = self.config.providers();
        Providers::from_defaults(providers.rainfall_mm, providers.elevation_m)
    }

    /// Render with the configured writer, then write to `output` or stdout.
    pub fn emit(
        &self,
        output: Option<&Path>,
        render: impl FnOnce(&mut dyn OutputWriter) -> Result<()>,
    ) -> Result<()> {
        let _phase = set_phase(Phase::OutputGeneration);
        let mut buffer = Vec::new();
        {
            let mut writer = create_writer(self.format, Box::new(&mut buffer), self.formatting);
            render(writer.as_mut())?;
        }
        let mut out = io::open_output(output)?;
        out.write_all(&buffer)?;
        out.flush()?;
        Ok(())
    }

    /// One-line confirmation for mutations that have nothing to render.
    pub fn confirm(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let body = serde_json::json!({ "message": message });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            _ => println!("{}", message),
        }
        Ok(())
    }
}

impl LocationArgs {
    pub fn coordinates(&self) -> Result<Coordinates> {
        Ok(Coordinates::new(self.lat, self.lon)?)
    }
}
