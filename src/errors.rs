//! Error types for floodcast operations.
//!
//! Library code returns [`FloodcastError`]; the binary and command handlers
//! work in `anyhow::Result` and convert at the edge. Scoring itself never
//! errors, so everything here concerns input validation, the event store and
//! configuration.
//!
//! # Error Codes
//!
//! - E001-E009: I/O errors
//! - E010-E019: Store errors
//! - E020-E029: Configuration errors
//! - E040-E049: Lookup errors (missing events, subscriptions)
//! - E050-E059: Validation errors
//!
//! # Example
//!
//! ```rust
//! use floodcast::errors::{ErrorCode, FloodcastError};
//!
//! let err = FloodcastError::not_found("flood event", 7);
//! assert_eq!(err.code(), ErrorCode::NOT_FOUND);
//! assert!(err.is_user_fixable());
//! ```

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");
    /// Store error - unreadable or unwritable store
    pub const STORE: ErrorCode = ErrorCode("E010");
    /// Store error - malformed JSON document
    pub const STORE_FORMAT: ErrorCode = ErrorCode("E011");
    /// Config error - invalid value or unparsable file
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Lookup error - no record with the requested id
    pub const NOT_FOUND: ErrorCode = ErrorCode("E040");
    /// Validation error - generic
    pub const VALIDATION: ErrorCode = ErrorCode("E050");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for floodcast operations
#[derive(Debug, Error)]
pub enum FloodcastError {
    /// Input rejected before any state changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Event store could not be read or written
    #[error("Store error at {}: {message}", path.display())]
    Store {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Event store file exists but is not a valid store document
    #[error("Malformed store at {}: {source}", path.display())]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl FloodcastError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: u64) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn store(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::Store {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    pub fn store_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::StoreFormat {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::VALIDATION,
            Self::NotFound { .. } => ErrorCode::NOT_FOUND,
            Self::Config { .. } | Self::Toml(_) => ErrorCode::CONFIG_INVALID,
            Self::Store { .. } => ErrorCode::STORE,
            Self::StoreFormat { .. } | Self::Json(_) => ErrorCode::STORE_FORMAT,
            Self::Io(_) => ErrorCode::IO_GENERIC,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation",
            Self::NotFound { .. } => "Lookup",
            Self::Config { .. } | Self::Toml(_) => "Config",
            Self::Store { .. } | Self::StoreFormat { .. } | Self::Json(_) => "Store",
            Self::Io(_) => "I/O",
        }
    }

    /// Errors the user can fix by changing arguments or configuration.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound { .. } | Self::Config { .. } | Self::Toml(_)
        )
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Config { path, .. } => path.as_ref(),
            Self::Store { path, .. } | Self::StoreFormat { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FloodcastError>;
