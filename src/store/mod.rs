//! Local record of flood events and alert subscriptions.
//!
//! The whole store is one JSON document read at open and written back on
//! [`EventStore::save`]. It is meant for a single process mutating it within
//! one command, not for concurrent writers.

pub mod events;
pub mod subscriptions;

pub use events::{EventQuery, FloodEvent, NewFloodEvent};
pub use subscriptions::{NewSubscription, Subscription, SubscriptionQuery, SubscriptionUpdate};

use crate::errors::{FloodcastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

fn first_id() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default = "first_id")]
    next_event_id: u64,
    #[serde(default = "first_id")]
    next_subscription_id: u64,
    #[serde(default)]
    events: Vec<FloodEvent>,
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            next_event_id: first_id(),
            next_subscription_id: first_id(),
            events: Vec::new(),
            subscriptions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventStore {
    path: Option<PathBuf>,
    doc: StoreDocument,
}

impl EventStore {
    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            doc: StoreDocument::default(),
        }
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => StoreDocument::default(),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| FloodcastError::store_format(&path, e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No store at {}; starting empty", path.display());
                StoreDocument::default()
            }
            Err(e) => {
                return Err(FloodcastError::store("cannot read store", &path, Some(e)));
            }
        };
        log::debug!(
            "Opened store {} ({} events, {} subscriptions)",
            path.display(),
            doc.events.len(),
            doc.subscriptions.len()
        );
        Ok(Self {
            path: Some(path),
            doc,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the document to a sibling temp file, then rename it into place.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                FloodcastError::store("cannot create store directory", path, Some(e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.doc)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| FloodcastError::store("cannot write store", &tmp, Some(e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| FloodcastError::store("cannot replace store", path, Some(e)))?;

        log::debug!("Saved store {}", path.display());
        Ok(())
    }
}

/// Shared bounds check for `skip`/`limit` paging arguments.
pub(crate) fn validate_limit(limit: usize, max: usize) -> Result<()> {
    if limit == 0 || limit > max {
        return Err(FloodcastError::validation(format!(
            "limit {} must be within 1..={}",
            limit, max
        )));
    }
    Ok(())
}
