//! Deciding who hears about a flood event, and telling them.
//!
//! Matching is a naive scan: a subscription matches when the event is within
//! its radius (planar degree distance) and at or above its minimum severity.

pub mod notifier;

pub use notifier::{Delivery, LogNotifier, Notifier, RecordingNotifier};

use crate::geo::{approx_distance_km, Coordinates};
use crate::risk::Severity;
use crate::store::{FloodEvent, Subscription};
use serde::{Deserialize, Serialize};

pub const NO_SUBSCRIBERS_MESSAGE: &str = "No subscriptions found for this location";

/// Active subscriptions that cover `location` at `severity`.
pub fn matching_subscriptions<'a>(
    subscriptions: &'a [Subscription],
    location: Coordinates,
    severity: Severity,
) -> Vec<&'a Subscription> {
    subscriptions
        .iter()
        .filter(|s| s.active)
        .filter(|s| approx_distance_km(s.location, location) <= s.radius_km)
        .filter(|s| severity.meets(s.min_severity))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub sms_text: String,
    pub email_subject: String,
    pub email_body: String,
}

pub fn compose_alert(event: &FloodEvent) -> AlertMessage {
    let sms_text = format!(
        "FLOOD ALERT: {} risk at {}\nRisk Score: {}/100\nLocation: {}\nTake necessary precautions.",
        event.severity, event.location_name, event.risk_score, event.location
    );
    let email_subject = format!(
        "Flood Alert: {} Risk at {}",
        event.severity, event.location_name
    );
    let email_body = format!(
        "Flood Risk Alert\n\n\
         Location: {}\n\
         Risk Level: {}\n\
         Risk Score: {}/100\n\
         Coordinates: {}\n\n\
         Please take necessary precautions and stay safe.\n",
        event.location_name, event.severity, event.risk_score, event.location
    );

    AlertMessage {
        sms_text,
        email_subject,
        email_body,
    }
}

/// Per-channel delivery counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub sms_sent: usize,
    pub sms_failed: usize,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub message: String,
}

impl NotificationResult {
    pub fn delivered(&self) -> usize {
        self.sms_sent + self.emails_sent
    }

    pub fn failed(&self) -> usize {
        self.sms_failed + self.emails_failed
    }
}

/// Send `event`'s alert to every matching subscriber over each channel
/// they registered.
pub fn dispatch_alert(
    notifier: &dyn Notifier,
    event: &FloodEvent,
    subscriptions: &[Subscription],
) -> NotificationResult {
    let matches = matching_subscriptions(subscriptions, event.location, event.severity);
    if matches.is_empty() {
        log::info!("No subscribers for flood event {}", event.id);
        return NotificationResult {
            message: NO_SUBSCRIBERS_MESSAGE.to_string(),
            ..NotificationResult::default()
        };
    }

    let alert = compose_alert(event);
    let mut result = NotificationResult::default();

    for phone in matches.iter().filter_map(|s| s.phone.as_deref()) {
        if notifier.send_sms(phone, &alert.sms_text) {
            result.sms_sent += 1;
        } else {
            result.sms_failed += 1;
        }
    }
    for email in matches.iter().filter_map(|s| s.email.as_deref()) {
        if notifier.send_email(email, &alert.email_subject, &alert.email_body) {
            result.emails_sent += 1;
        } else {
            result.emails_failed += 1;
        }
    }

    result.message = format!("Notified {} subscriptions", matches.len());
    if result.failed() > 0 {
        log::warn!(
            "Flood event {}: {} deliveries failed",
            event.id,
            result.failed()
        );
    }
    result
}
