use super::CommandContext;
use crate::alerts::{dispatch_alert, LogNotifier, NotificationResult, Notifier};
use crate::cli::{EventsCommand, LocationArgs, ReadingArgs};
use crate::config::AlertsConfig;
use crate::errors::FloodcastError;
use crate::observability::{set_current_target, set_phase, Phase};
use crate::providers;
use crate::store::{EventQuery, EventStore, FloodEvent, NewFloodEvent};
use anyhow::Result;

pub fn run(ctx: &CommandContext, command: EventsCommand) -> Result<()> {
    match command {
        EventsCommand::Add {
            name,
            location,
            readings,
            description,
            no_notify,
        } => add(ctx, name, location, readings, description, no_notify),
        EventsCommand::List {
            skip,
            limit,
            severity,
        } => {
            let _span = tracing::info_span!("events_list", skip, limit).entered();
            let store = ctx.open_store()?;
            let events = store.list_events(&EventQuery {
                skip,
                limit,
                severity,
            })?;
            ctx.emit(None, |w| w.write_events(&events))
        }
        EventsCommand::Show { id } => {
            let _span = tracing::info_span!("events_show", id).entered();
            let store = ctx.open_store()?;
            let event = store
                .get_event(id)
                .ok_or_else(|| FloodcastError::not_found("flood event", id))?;
            ctx.emit(None, |w| w.write_event(event))
        }
        EventsCommand::Nearby {
            location,
            radius_km,
        } => {
            let _span = tracing::info_span!("events_nearby", radius_km).entered();
            let store = ctx.open_store()?;
            let events = store.nearby_events(location.coordinates()?, radius_km)?;
            ctx.emit(None, |w| w.write_events(&events))
        }
        EventsCommand::Delete { id } => {
            let _span = tracing::info_span!("events_delete", id).entered();
            let mut store = ctx.open_store()?;
            if !store.delete_event(id) {
                return Err(FloodcastError::not_found("flood event", id).into());
            }
            ctx.save_store(&store)?;
            ctx.confirm(&format!("Deleted flood event {}", id))
        }
    }
}

fn add(
    ctx: &CommandContext,
    name: String,
    location: LocationArgs,
    readings: ReadingArgs,
    description: Option<String>,
    no_notify: bool,
) -> Result<()> {
    let _span = tracing::info_span!("events_add", name = %name).entered();

    let coordinates = location.coordinates()?;
    let mut store = ctx.open_store()?;

    let assessment = {
        let _phase = set_phase(Phase::Scoring);
        providers::assess(
            coordinates,
            Some(name.clone()),
            readings.into(),
            &ctx.providers(),
        )
    };

    let mut new_event = NewFloodEvent::new(name);
    if let Some(description) = description {
        new_event = new_event.with_description(description);
    }
    let event = store.create_event(new_event, &assessment)?;
    ctx.save_store(&store)?;

    auto_notify(&LogNotifier, &ctx.config.alerts(), no_notify, &store, &event);

    ctx.emit(None, |w| w.write_event(&event))
}

/// Alert on a just-recorded event unless `--no-notify` was given or
/// `[alerts] auto_notify` is off.
pub fn auto_notify(
    notifier: &dyn Notifier,
    alerts: &AlertsConfig,
    no_notify: bool,
    store: &EventStore,
    event: &FloodEvent,
) -> Option<NotificationResult> {
    if no_notify || !alerts.auto_notify {
        log::debug!("Automatic alerts disabled for event {}", event.id);
        return None;
    }
    notify_if_alerting(notifier, store, event)
}

/// Dispatch alerts for a freshly recorded High or Critical event.
///
/// Delivery problems are logged; recording the event already succeeded.
pub fn notify_if_alerting(
    notifier: &dyn Notifier,
    store: &EventStore,
    event: &FloodEvent,
) -> Option<NotificationResult> {
    if !event.severity.is_alerting() {
        return None;
    }
    let _phase = set_phase(Phase::Alerting);
    let _target = set_current_target(format!("event {}", event.id));

    let result = dispatch_alert(notifier, event, store.subscriptions());
    log::info!(
        "Flood event {} ({}): {}",
        event.id,
        event.severity,
        result.message
    );
    Some(result)
}
