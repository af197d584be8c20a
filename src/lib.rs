//! Flood risk scoring with a local event log and subscriber alerts.
//!
//! The core is [`risk::score`], a pure lookup-and-sum over rainfall and
//! elevation buckets. Around it sit reading providers, a JSON-file event
//! store, alert matching/dispatch and the `floodcast` CLI.

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod geo;
pub mod io;
pub mod observability;
pub mod output;
pub mod providers;
pub mod risk;
pub mod store;

pub use crate::errors::{ErrorCode, FloodcastError, Result};
pub use crate::geo::Coordinates;
pub use crate::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::providers::{assess, Assessment, Overrides, Providers, Reading, ReadingSource};
pub use crate::risk::{score, score_batch, RiskScore, ScoringInput, ScoringResult, Severity};
pub use crate::store::{EventStore, FloodEvent, Subscription};
