use crate::output::OutputFormat;
use crate::risk::Severity;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "floodcast")]
#[command(about = "Flood risk scoring, event log and alert dispatch", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Plain output: no colours, no emoji, ASCII tables
    #[arg(long, global = true)]
    pub plain: bool,

    /// Configuration file (skips .floodcast.toml discovery)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Event store file
    #[arg(long, env = "FLOODCAST_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Output format (defaults to the config's `[output] default_format`)
    #[arg(short = 'f', long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a rainfall/elevation pair
    Score {
        /// Rainfall in millimetres
        #[arg(long, allow_negative_numbers = true)]
        rainfall: f64,

        /// Elevation in metres
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },

    /// Score a location without recording it
    Assess {
        #[command(flatten)]
        location: LocationArgs,

        /// Display name for the location
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        readings: ReadingArgs,
    },

    /// Score every row of a JSON array in parallel
    Batch {
        /// JSON file of `{"rainfall_mm": .., "elevation_m": ..}` rows
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record and query flood events
    #[command(subcommand)]
    Events(EventsCommand),

    /// Manage alert subscriptions
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommand),

    /// Dispatch alerts
    #[command(subcommand)]
    Alerts(AlertsCommand),

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LocationArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ReadingArgs {
    /// Rainfall in millimetres (skips the rainfall provider)
    #[arg(long, allow_negative_numbers = true)]
    pub rainfall: Option<f64>,

    /// Elevation in metres (skips the elevation provider)
    #[arg(long, allow_negative_numbers = true)]
    pub elevation: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// Assess a location and record it as a flood event
    Add {
        /// Location name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        location: LocationArgs,

        #[command(flatten)]
        readings: ReadingArgs,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Don't dispatch alerts even for High/Critical events
        #[arg(long)]
        no_notify: bool,
    },

    /// List events, newest first
    List {
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum events to return (1-500)
        #[arg(long, default_value_t = crate::store::events::DEFAULT_LIMIT)]
        limit: usize,

        /// Only events with exactly this severity
        #[arg(long)]
        severity: Option<Severity>,
    },

    /// Show a single event
    Show { id: u64 },

    /// Events inside a square box around a point
    Nearby {
        #[command(flatten)]
        location: LocationArgs,

        /// Half-width of the box in km (0.1-50)
        #[arg(long, default_value_t = crate::store::events::DEFAULT_RADIUS_KM)]
        radius_km: f64,
    },

    /// Delete an event
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsCommand {
    /// Subscribe an email address and/or phone number to a location
    Add {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[command(flatten)]
        location: LocationArgs,

        /// Alert radius in km (defaults to the config's value)
        #[arg(long)]
        radius_km: Option<f64>,

        /// Lowest severity to alert on (defaults to the config's value)
        #[arg(long)]
        min_severity: Option<Severity>,
    },

    /// List subscriptions
    List {
        /// Include inactive subscriptions
        #[arg(long)]
        all: bool,

        #[arg(long, default_value_t = 0)]
        skip: usize,

        #[arg(long, default_value_t = 100)]
        limit: usize,
    },

    /// Show a single subscription
    Show { id: u64 },

    /// Change fields of a subscription
    Update {
        id: u64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        radius_km: Option<f64>,

        #[arg(long)]
        min_severity: Option<Severity>,

        /// Enable or disable the subscription
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a subscription
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// Notify subscribers near a recorded event
    Send { event_id: u64 },
}
