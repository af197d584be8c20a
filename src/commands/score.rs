use super::CommandContext;
use crate::observability::{set_phase, Phase};
use crate::risk::ScoringInput;
use anyhow::Result;

pub fn run(ctx: &CommandContext, rainfall_mm: f64, elevation_m: f64) -> Result<()> {
    let _span = tracing::info_span!("score", rainfall_mm, elevation_m).entered();

    let input = ScoringInput::new(rainfall_mm, elevation_m);
    let result = {
        let _phase = set_phase(Phase::Scoring);
        input.score()
    };
    log::debug!("Scored {:?}: {}", input, result.risk_score);

    ctx.emit(None, |w| w.write_score(&input, &result))
}
