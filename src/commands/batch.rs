use super::CommandContext;
use crate::io;
use crate::observability::{set_current_target, set_phase, Phase};
use crate::risk::{self, ScoringInput};
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a JSON array of scoring rows. Missing or `null` fields read as 0.0.
pub fn parse_inputs(contents: &str) -> Result<Vec<ScoringInput>> {
    serde_json::from_str(contents)
        .context("Batch input must be a JSON array of {\"rainfall_mm\", \"elevation_m\"} objects")
}

pub fn run(ctx: &CommandContext, input: &Path, output: Option<&Path>) -> Result<()> {
    let _span = tracing::info_span!("batch", input = %input.display()).entered();
    let _target = set_current_target(input.display().to_string());

    let inputs = parse_inputs(&io::read_file(input)?)?;
    log::info!("Scoring {} rows from {}", inputs.len(), input.display());

    let results = {
        let _phase = set_phase(Phase::Scoring);
        risk::score_batch(&inputs)
    };
    let rows: Vec<_> = inputs.into_iter().zip(results).collect();

    ctx.emit(output, |w| w.write_batch(&rows))
}
