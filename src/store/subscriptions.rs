use super::{validate_limit, EventStore};
use crate::errors::{FloodcastError, Result};
use crate::geo::Coordinates;
use crate::risk::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBSCRIPTION_RADIUS_KM: f64 = 5.0;
const MAX_LIMIT: usize = 1000;

/// Someone who wants to hear about floods near a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub location: Coordinates,
    pub radius_km: f64,
    pub min_severity: Severity,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Coordinates,
    pub radius_km: f64,
    pub min_severity: Severity,
}

impl NewSubscription {
    pub fn new(location: Coordinates) -> Self {
        Self {
            email: None,
            phone: None,
            location,
            radius_km: DEFAULT_SUBSCRIPTION_RADIUS_KM,
            min_severity: Severity::Medium,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub radius_km: Option<f64>,
    pub min_severity: Option<Severity>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionQuery {
    pub skip: usize,
    pub limit: usize,
    pub active_only: bool,
}

impl Default for SubscriptionQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            active_only: true,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_contact(email: &Option<String>, phone: &Option<String>) -> Result<()> {
    if email.is_none() && phone.is_none() {
        return Err(FloodcastError::validation(
            "at least one contact method (email or phone) is required",
        ));
    }
    Ok(())
}

fn validate_radius(radius_km: f64) -> Result<()> {
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(FloodcastError::validation(format!(
            "radius {} km must be a positive number",
            radius_km
        )));
    }
    Ok(())
}

impl EventStore {
    pub fn create_subscription(&mut self, new_sub: NewSubscription) -> Result<Subscription> {
        let email = non_blank(new_sub.email);
        let phone = non_blank(new_sub.phone);
        validate_contact(&email, &phone)?;
        validate_radius(new_sub.radius_km)?;

        let id = self.doc.next_subscription_id;
        self.doc.next_subscription_id += 1;

        let subscription = Subscription {
            id,
            email,
            phone,
            location: new_sub.location,
            radius_km: new_sub.radius_km,
            min_severity: new_sub.min_severity,
            active: true,
            created_at: Utc::now(),
        };
        log::info!(
            "Subscribed {} within {} km of {}",
            subscription.id,
            subscription.radius_km,
            subscription.location
        );
        self.doc.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    pub fn get_subscription(&self, id: u64) -> Option<&Subscription> {
        self.doc.subscriptions.iter().find(|s| s.id == id)
    }

    /// Every stored subscription, active or not, in creation order.
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.doc.subscriptions
    }

    pub fn list_subscriptions(&self, query: &SubscriptionQuery) -> Result<Vec<Subscription>> {
        validate_limit(query.limit, MAX_LIMIT)?;
        Ok(self
            .doc
            .subscriptions
            .iter()
            .filter(|s| !query.active_only || s.active)
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    /// Apply `update` to subscription `id`. The result must still have a
    /// contact method and a positive radius, otherwise nothing changes.
    pub fn update_subscription(&mut self, id: u64, update: SubscriptionUpdate) -> Result<Subscription> {
        let current = self
            .doc
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| FloodcastError::not_found("subscription", id))?;

        let mut updated = current.clone();
        if let Some(email) = update.email {
            updated.email = non_blank(Some(email));
        }
        if let Some(phone) = update.phone {
            updated.phone = non_blank(Some(phone));
        }
        if let Some(radius_km) = update.radius_km {
            updated.radius_km = radius_km;
        }
        if let Some(min_severity) = update.min_severity {
            updated.min_severity = min_severity;
        }
        if let Some(active) = update.active {
            updated.active = active;
        }

        validate_contact(&updated.email, &updated.phone)?;
        validate_radius(updated.radius_km)?;

        *current = updated.clone();
        log::info!("Updated subscription {}", id);
        Ok(updated)
    }

    pub fn delete_subscription(&mut self, id: u64) -> bool {
        let before = self.doc.subscriptions.len();
        self.doc.subscriptions.retain(|s| s.id != id);
        let removed = self.doc.subscriptions.len() != before;
        if removed {
            log::info!("Deleted subscription {}", id);
        }
        removed
    }
}
