use super::CommandContext;
use crate::cli::SubscriptionsCommand;
use crate::errors::FloodcastError;
use crate::store::{NewSubscription, SubscriptionQuery, SubscriptionUpdate};
use anyhow::Result;

pub fn run(ctx: &CommandContext, command: SubscriptionsCommand) -> Result<()> {
    match command {
        SubscriptionsCommand::Add {
            email,
            phone,
            location,
            radius_km,
            min_severity,
        } => {
            let _span = tracing::info_span!("subscriptions_add").entered();
            let defaults = ctx.config.alerts();
            let new_sub = NewSubscription {
                email,
                phone,
                location: location.coordinates()?,
                radius_km: radius_km.unwrap_or(defaults.default_radius_km),
                min_severity: min_severity.unwrap_or(defaults.default_min_severity),
            };

            let mut store = ctx.open_store()?;
            let created = store.create_subscription(new_sub)?;
            ctx.save_store(&store)?;
            ctx.emit(None, |w| w.write_subscriptions(std::slice::from_ref(&created)))
        }
        SubscriptionsCommand::List { all, skip, limit } => {
            let _span = tracing::info_span!("subscriptions_list", all).entered();
            let store = ctx.open_store()?;
            let subscriptions = store.list_subscriptions(&SubscriptionQuery {
                skip,
                limit,
                active_only: !all,
            })?;
            ctx.emit(None, |w| w.write_subscriptions(&subscriptions))
        }
        SubscriptionsCommand::Show { id } => {
            let _span = tracing::info_span!("subscriptions_show", id).entered();
            let store = ctx.open_store()?;
            let subscription = store
                .get_subscription(id)
                .ok_or_else(|| FloodcastError::not_found("subscription", id))?;
            ctx.emit(None, |w| w.write_subscriptions(std::slice::from_ref(subscription)))
        }
        SubscriptionsCommand::Update {
            id,
            email,
            phone,
            radius_km,
            min_severity,
            active,
        } => {
            let _span = tracing::info_span!("subscriptions_update", id).entered();
            let mut store = ctx.open_store()?;
            let updated = store.update_subscription(
                id,
                SubscriptionUpdate {
                    email,
                    phone,
                    radius_km,
                    min_severity,
                    active,
                },
            )?;
            ctx.save_store(&store)?;
            ctx.emit(None, |w| w.write_subscriptions(std::slice::from_ref(&updated)))
        }
        SubscriptionsCommand::Delete { id } => {
            let _span = tracing::info_span!("subscriptions_delete", id).entered();
            let mut store = ctx.open_store()?;
            if !store.delete_subscription(id) {
                return Err(FloodcastError::not_found("subscription", id).into());
            }
            ctx.save_store(&store)?;
            ctx.confirm(&format!("Deleted subscription {}", id))
        }
    }
}
