//! Report writers for scores, events, subscriptions and alert tallies.

mod json;
mod markdown;
mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::alerts::NotificationResult;
use crate::formatting::FormattingConfig;
use crate::providers::Assessment;
use crate::risk::{ScoringInput, ScoringResult};
use crate::store::{FloodEvent, Subscription};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_score(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()>;
    fn write_assessment(&mut self, assessment: &Assessment) -> anyhow::Result<()>;
    fn write_batch(&mut self, rows: &[(ScoringInput, ScoringResult)]) -> anyhow::Result<()>;
    fn write_events(&mut self, events: &[FloodEvent]) -> anyhow::Result<()>;
    fn write_event(&mut self, event: &FloodEvent) -> anyhow::Result<()>;
    fn write_subscriptions(&mut self, subscriptions: &[Subscription]) -> anyhow::Result<()>;
    fn write_notification(&mut self, result: &NotificationResult) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

/// `12.3 mm` for a recorded reading, `n/a` when the provider had no data.
pub(crate) fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1} {}", v, unit),
        None => "n/a".to_string(),
    }
}
