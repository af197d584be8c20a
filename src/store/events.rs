use super::{validate_limit, EventStore};
use crate::errors::{FloodcastError, Result};
use crate::geo::{BoundingBox, Coordinates};
use crate::providers::Assessment;
use crate::risk::{RiskScore, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 500;
pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const MIN_NEARBY_RADIUS_KM: f64 = 0.1;
pub const MAX_NEARBY_RADIUS_KM: f64 = 50.0;

/// A scored location, persisted exactly as it was assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodEvent {
    pub id: u64,
    pub location_name: String,
    #[serde(flatten)]
    pub location: Coordinates,
    pub severity: Severity,
    pub risk_score: RiskScore,
    pub timestamp: DateTime<Utc>,
    pub rainfall_mm: Option<f64>,
    pub elevation_m: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFloodEvent {
    pub location_name: String,
    pub description: Option<String>,
}

impl NewFloodEvent {
    pub fn new(location_name: impl Into<String>) -> Self {
        Self {
            location_name: location_name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventQuery {
    pub skip: usize,
    pub limit: usize,
    pub severity: Option<Severity>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            severity: None,
        }
    }
}

impl EventStore {
    pub fn create_event(
        &mut self,
        new_event: NewFloodEvent,
        assessment: &Assessment,
    ) -> Result<FloodEvent> {
        self.create_event_at(new_event, assessment, Utc::now())
    }

    pub fn create_event_at(
        &mut self,
        new_event: NewFloodEvent,
        assessment: &Assessment,
        timestamp: DateTime<Utc>,
    ) -> Result<FloodEvent> {
        let location_name = new_event.location_name.trim().to_string();
        if location_name.is_empty() {
            return Err(FloodcastError::validation("location name must not be empty"));
        }

        let id = self.doc.next_event_id;
        self.doc.next_event_id += 1;

        let event = FloodEvent {
            id,
            location_name,
            location: assessment.location,
            severity: assessment.result.severity,
            risk_score: assessment.result.risk_score,
            timestamp,
            rainfall_mm: assessment.rainfall.recorded(),
            elevation_m: assessment.elevation.recorded(),
            description: new_event.description,
        };
        log::info!(
            "Recorded flood event {} at {} ({} {})",
            event.id,
            event.location_name,
            event.severity,
            event.risk_score
        );
        self.doc.events.push(event.clone());
        Ok(event)
    }

    pub fn get_event(&self, id: u64) -> Option<&FloodEvent> {
        self.doc.events.iter().find(|e| e.id == id)
    }

    /// Newest first; equal timestamps put the higher id first.
    pub fn list_events(&self, query: &EventQuery) -> Result<Vec<FloodEvent>> {
        validate_limit(query.limit, MAX_LIMIT)?;

        let mut events: Vec<&FloodEvent> = self
            .doc
            .events
            .iter()
            .filter(|e| query.severity.is_none_or(|s| e.severity == s))
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        Ok(events
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    /// Events inside the bounding box of `radius_km` around `center`.
    pub fn nearby_events(&self, center: Coordinates, radius_km: f64) -> Result<Vec<FloodEvent>> {
        if !(MIN_NEARBY_RADIUS_KM..=MAX_NEARBY_RADIUS_KM).contains(&radius_km) {
            return Err(FloodcastError::validation(format!(
                "radius {} km must be within {}..={} km",
                radius_km, MIN_NEARBY_RADIUS_KM, MAX_NEARBY_RADIUS_KM
            )));
        }

        let bbox = BoundingBox::around(center, radius_km);
        Ok(self
            .doc
            .events
            .iter()
            .filter(|e| bbox.contains(e.location))
            .cloned()
            .collect())
    }

    /// Remove an event. Its id is never handed out again.
    pub fn delete_event(&mut self, id: u64) -> bool {
        let before = self.doc.events.len();
        self.doc.events.retain(|e| e.id != id);
        let removed = self.doc.events.len() != before;
        if removed {
            log::info!("Deleted flood event {}", id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{assess, Overrides, Providers};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn assessment(lat: f64, lon: f64, rainfall: f64, elevation: f64) -> Assessment {
        let overrides = Overrides {
            rainfall_mm: Some(rainfall),
            elevation_m: Some(elevation),
        };
        assess(
            Coordinates::new(lat, lon).unwrap(),
            None,
            overrides,
            &Providers::default(),
        )
    }

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 8, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_create_copies_assessment() {
        let mut store = EventStore::in_memory();
        let event = store
            .create_event_at(
                NewFloodEvent::new("  Main Street ").with_description("near river"),
                &assessment(40.7128, -74.0060, 35.2, 12.3),
                at_hour(10),
            )
            .unwrap();

        assert_eq!(event.id, 1);
        assert_eq!(event.location_name, "Main Street");
        assert_eq!(event.severity, Severity::Critical);
        assert_eq!(event.risk_score.value(), 80.0);
        assert_eq!(event.rainfall_mm, Some(35.2));
        assert_eq!(event.elevation_m, Some(12.3));
        assert_eq!(event.description.as_deref(), Some("near river"));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut store = EventStore::in_memory();
        let result = store.create_event(NewFloodEvent::new("   "), &assessment(0.0, 0.0, 1.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_unavailable_readings_are_not_recorded() {
        let mut store = EventStore::in_memory();
        let a = assess(
            Coordinates::new(1.0, 1.0).unwrap(),
            None,
            Overrides::default(),
            &Providers::default(),
        );
        let event = store.create_event(NewFloodEvent::new("Dock"), &a).unwrap();
        assert_eq!(event.rainfall_mm, None);
        assert_eq!(event.elevation_m, None);
    }

    #[test]
    fn test_list_newest_first_with_severity_filter() {
        let mut store = EventStore::in_memory();
        let hi = assessment(0.0, 0.0, 60.0, 0.0);
        let lo = assessment(0.0, 0.0, 0.0, 500.0);
        store.create_event_at(NewFloodEvent::new("a"), &hi, at_hour(8)).unwrap();
        store.create_event_at(NewFloodEvent::new("b"), &lo, at_hour(9)).unwrap();
        store.create_event_at(NewFloodEvent::new("c"), &hi, at_hour(10)).unwrap();
        store.create_event_at(NewFloodEvent::new("d"), &hi, at_hour(10)).unwrap();

        let all = store.list_events(&EventQuery::default()).unwrap();
        let names: Vec<&str> = all.iter().map(|e| e.location_name.as_str()).collect();
        assert_eq!(names, vec!["d", "c", "b", "a"]);

        let critical = store
            .list_events(&EventQuery {
                severity: Some(Severity::Critical),
                ..EventQuery::default()
            })
            .unwrap();
        assert_eq!(critical.len(), 3);

        let page = store
            .list_events(&EventQuery {
                skip: 1,
                limit: 2,
                severity: None,
            })
            .unwrap();
        let names: Vec<&str> = page.iter().map(|e| e.location_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn test_list_rejects_bad_limit() {
        let store = EventStore::in_memory();
        for limit in [0, 501] {
            let query = EventQuery {
                limit,
                ..EventQuery::default()
            };
            assert!(store.list_events(&query).is_err());
        }
    }

    #[test]
    fn test_nearby_uses_bounding_box() {
        let mut store = EventStore::in_memory();
        store
            .create_event(NewFloodEvent::new("close"), &assessment(40.7130, -74.0050, 1.0, 1.0))
            .unwrap();
        store
            .create_event(NewFloodEvent::new("far"), &assessment(41.5, -74.0060, 1.0, 1.0))
            .unwrap();

        let center = Coordinates::new(40.7128, -74.0060).unwrap();
        let nearby = store.nearby_events(center, 5.0).unwrap();
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].location_name, "close");
    }

    #[test]
    fn test_nearby_rejects_radius_out_of_range() {
        let store = EventStore::in_memory();
        let center = Coordinates::new(0.0, 0.0).unwrap();
        assert!(store.nearby_events(center, 0.05).is_err());
        assert!(store.nearby_events(center, 51.0).is_err());
        assert!(store.nearby_events(center, 50.0).is_ok());
    }

    #[test]
    fn test_delete_never_reuses_ids() {
        let mut store = EventStore::in_memory();
        let a = assessment(0.0, 0.0, 1.0, 1.0);
        let first = store.create_event(NewFloodEvent::new("a"), &a).unwrap();
        assert!(store.delete_event(first.id));
        assert!(!store.delete_event(first.id));
        let second = store.create_event(NewFloodEvent::new("b"), &a).unwrap();
        assert_eq!(second.id, 2);
        assert!(store.get_event(first.id).is_none());
    }

    #[test]
    fn test_event_serializes_flat_coordinates() {
        let mut store = EventStore::in_memory();
        let event = store
            .create_event_at(
                NewFloodEvent::new("Main Street"),
                &assessment(40.7128, -74.006, 35.2, 15.5),
                at_hour(10),
            )
            .unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["latitude"], 40.7128);
        assert_eq!(json["severity"], "Critical");
        assert_eq!(json["risk_score"], 80.0);
        assert_eq!(json["timestamp"], "2025-10-08T10:30:00Z");
    }
}
