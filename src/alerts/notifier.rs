use std::sync::Mutex;

/// Delivery channel for alerts. Implementations report whether each message
/// was accepted; failures are counted, never raised.
pub trait Notifier {
    fn send_sms(&self, to_phone: &str, text: &str) -> bool;
    fn send_email(&self, to_email: &str, subject: &str, body: &str) -> bool;
}

/// Writes each delivery to the log instead of a transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_sms(&self, to_phone: &str, text: &str) -> bool {
        log::info!("SMS to {}: {}", to_phone, text.replace('\n', " | "));
        true
    }

    fn send_email(&self, to_email: &str, subject: &str, _body: &str) -> bool {
        log::info!("Email to {}: {}", to_email, subject);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sms { to: String, text: String },
    Email { to: String, subject: String },
}

/// Keeps every delivery in memory. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    deliveries: Mutex<Vec<Delivery>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Records deliveries but reports each one as failed.
    pub fn failing() -> Self {
        Self {
            deliveries: Mutex::default(),
            fail: true,
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, delivery: Delivery) -> bool {
        self.deliveries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(delivery);
        !self.fail
    }
}

impl Notifier for RecordingNotifier {
    fn send_sms(&self, to_phone: &str, text: &str) -> bool {
        self.record(Delivery::Sms {
            to: to_phone.to_string(),
            text: text.to_string(),
        })
    }

    fn send_email(&self, to_email: &str, subject: &str, _body: &str) -> bool {
        self.record(Delivery::Email {
            to: to_email.to_string(),
            subject: subject.to_string(),
        })
    }
}
