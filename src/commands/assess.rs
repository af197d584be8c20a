use super::CommandContext;
use crate::cli::{LocationArgs, ReadingArgs};
use crate::observability::{set_current_target, set_phase, Phase};
use crate::providers::{self, Overrides};
use anyhow::Result;

pub fn run(
    ctx: &CommandContext,
    location: LocationArgs,
    name: Option<String>,
    readings: ReadingArgs,
) -> Result<()> {
    let _span = tracing::info_span!("assess", lat = location.lat, lon = location.lon).entered();

    let coordinates = location.coordinates()?;
    let _phase = set_phase(Phase::Scoring);
    let _target = set_current_target(coordinates.to_string());

    let assessment = providers::assess(
        coordinates,
        name,
        readings.into(),
        &ctx.providers(),
    );
    ctx.emit(None, |w| w.write_assessment(&assessment))
}

impl From<ReadingArgs> for Overrides {
    fn from(args: ReadingArgs) -> Self {
        Overrides {
            rainfall_mm: args.rainfall,
            elevation_m: args.elevation,
        }
    }
}
