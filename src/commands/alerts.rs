use super::CommandContext;
use crate::alerts::{dispatch_alert, LogNotifier};
use crate::cli::AlertsCommand;
use crate::errors::FloodcastError;
use crate::observability::{set_current_target, set_phase, Phase};
use anyhow::Result;

pub fn run(ctx: &CommandContext, command: AlertsCommand) -> Result<()> {
    match command {
        AlertsCommand::Send { event_id } => {
            let _span = tracing::info_span!("alerts_send", event_id).entered();
            let store = ctx.open_store()?;
            let event = store
                .get_event(event_id)
                .ok_or_else(|| FloodcastError::not_found("flood event", event_id))?;

            let result = {
                let _phase = set_phase(Phase::Alerting);
                let _target = set_current_target(format!("event {}", event_id));
                dispatch_alert(&LogNotifier, event, store.subscriptions())
            };
            ctx.emit(None, |w| w.write_notification(&result))
        }
    }
}
