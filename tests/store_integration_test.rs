//! Event store persistence and alert dispatch across reopen.

use chrono::{TimeZone, Utc};
use floodcast::alerts::{dispatch_alert, Delivery, RecordingNotifier, NO_SUBSCRIBERS_MESSAGE};
use floodcast::geo::Coordinates;
use floodcast::providers::{assess, Overrides, Providers};
use floodcast::risk::Severity;
use floodcast::store::{EventQuery, EventStore, NewFloodEvent, NewSubscription};
use floodcast::FloodcastError;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn at(lat: f64, lon: f64) -> Coordinates {
    Coordinates::new(lat, lon).unwrap()
}

fn record(store: &mut EventStore, name: &str, location: Coordinates, rainfall: f64, hour: u32) -> u64 {
    let assessment = assess(
        location,
        Some(name.to_string()),
        Overrides {
            rainfall_mm: Some(rainfall),
            elevation_m: None,
        },
        &Providers::default(),
    );
    let timestamp = Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap();
    store
        .create_event_at(NewFloodEvent::new(name), &assessment, timestamp)
        .unwrap()
        .id
}

#[test]
fn test_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("events.json");

    let mut store = EventStore::open(&path).unwrap();
    let id = record(&mut store, "Canal St", at(29.95, -90.07), 42.0, 6);
    store.save().unwrap();

    let reopened = EventStore::open(&path).unwrap();
    let event = reopened.get_event(id).unwrap();
    assert_eq!(event.location_name, "Canal St");
    assert_eq!(event.rainfall_mm, Some(42.0));
    // No elevation provider: stored as missing, scored as 0 m
    assert_eq!(event.elevation_m, None);
    assert_eq!(event.risk_score.value(), 90.0);
    assert_eq!(event.severity, Severity::Critical);
}

#[test]
fn test_ids_survive_delete_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");

    let mut store = EventStore::open(&path).unwrap();
    record(&mut store, "A", at(0.0, 0.0), 1.0, 1);
    let second = record(&mut store, "B", at(0.0, 0.0), 1.0, 2);
    assert!(store.delete_event(second));
    store.save().unwrap();

    let mut store = EventStore::open(&path).unwrap();
    let third = record(&mut store, "C", at(0.0, 0.0), 1.0, 3);
    assert_eq!(third, 3);
}

#[test]
fn test_list_is_newest_first_with_filter() {
    let mut store = EventStore::in_memory();
    record(&mut store, "early", at(1.0, 1.0), 60.0, 1);
    record(&mut store, "late", at(1.0, 1.0), 60.0, 9);
    record(&mut store, "middle-dry", at(1.0, 1.0), 0.0, 5);

    let names: Vec<String> = store
        .list_events(&EventQuery::default())
        .unwrap()
        .into_iter()
        .map(|e| e.location_name)
        .collect();
    assert_eq!(names, vec!["late", "middle-dry", "early"]);

    let critical = store
        .list_events(&EventQuery {
            severity: Some(Severity::Critical),
            ..EventQuery::default()
        })
        .unwrap();
    assert_eq!(critical.len(), 2);
}

#[test]
fn test_out_of_range_coordinates_in_store_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");

    let mut store = EventStore::open(&path).unwrap();
    record(&mut store, "Bayou", at(29.76, -95.37), 20.0, 9);
    store.save().unwrap();

    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    doc["events"][0]["latitude"] = serde_json::json!(200.0);
    fs::write(&path, doc.to_string()).unwrap();

    let err = EventStore::open(&path).unwrap_err();
    assert_eq!(err.code().as_str(), "E011");
    assert!(err.to_string().contains("latitude 200 must be within [-90, 90]"));
}

#[test]
fn test_malformed_store_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");
    fs::write(&path, "{ not json").unwrap();

    let err = EventStore::open(&path).unwrap_err();
    assert!(matches!(err, FloodcastError::StoreFormat { .. }));
    assert_eq!(err.code().as_str(), "E011");
    assert_eq!(err.path(), Some(&path));
}

#[test]
fn test_dispatch_uses_every_contact_channel() {
    let mut store = EventStore::in_memory();
    let mut both = NewSubscription::new(at(29.76, -95.37));
    both.email = Some("ops@example.com".into());
    both.phone = Some("+15550100".into());
    store.create_subscription(both).unwrap();

    let mut too_far = NewSubscription::new(at(31.0, -95.37));
    too_far.email = Some("far@example.com".into());
    store.create_subscription(too_far).unwrap();

    let mut picky = NewSubscription::new(at(29.76, -95.37));
    picky.phone = Some("+15550199".into());
    picky.min_severity = Severity::Critical;
    store.create_subscription(picky).unwrap();

    // 20 mm, no elevation data: 35 + 40 = 75, High
    let id = record(&mut store, "Downtown", at(29.76, -95.37), 20.0, 4);
    let event = store.get_event(id).unwrap().clone();

    let notifier = RecordingNotifier::default();
    let result = dispatch_alert(&notifier, &event, store.subscriptions());

    assert_eq!(event.severity, Severity::High);
    assert_eq!(result.sms_sent, 1);
    assert_eq!(result.emails_sent, 1);
    assert_eq!(result.message, "Notified 1 subscriptions");
    let emailed: Vec<String> = notifier
        .deliveries()
        .into_iter()
        .filter_map(|d| match d {
            Delivery::Email { to, .. } => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(emailed, vec!["ops@example.com".to_string()]);
}

#[test]
fn test_dispatch_without_matches() {
    let mut store = EventStore::in_memory();
    let id = record(&mut store, "Nowhere", at(-10.0, 20.0), 60.0, 0);
    let event = store.get_event(id).unwrap().clone();

    let result = dispatch_alert(&RecordingNotifier::default(), &event, store.subscriptions());
    assert_eq!(result.message, NO_SUBSCRIBERS_MESSAGE);
    assert_eq!(result.delivered(), 0);
}
