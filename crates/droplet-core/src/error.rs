//! Core error types for droplet-core.
//!
//! This module defines the error hierarchy using thiserror. Invalid
//! configuration is rejected here before it ever reaches the store;
//! timezone fallback at evaluation time is deliberately *not* an error
//! (the resolver degrades to the default zone and logs).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for droplet-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Profile store errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Application configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Profile validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification delivery errors
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Profile-store-specific errors.
///
/// A store failure during a tick is logged and the profile retried on the
/// next tick; it never crashes the driver.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("failed to open profile store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// Schema migration failed
    #[error("profile store migration failed: {0}")]
    MigrationFailed(String),

    /// Stored profile could not be encoded or decoded
    #[error("profile encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Backing storage could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// IO errors from the data directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-file-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the configuration file
    #[error("failed to write config at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("invalid config: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("config serialization failed: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    /// Data directory could not be created
    #[error("data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Rejected profile settings. These never reach the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("cadence must be a positive number of minutes")]
    InvalidCadence,

    #[error("amount must be positive and finite, got {0}")]
    InvalidAmount(f64),

    #[error("unknown unit '{0}' (expected ml or oz)")]
    UnknownUnit(String),

    #[error("unresolvable timezone identifier '{0}'")]
    InvalidTimezone(String),

    #[error("unknown quantity mode '{0}' (expected fixed or goal)")]
    UnknownMode(String),

    #[error("profile needs {0} before reminders can be scheduled")]
    MissingSetting(&'static str),
}

/// Notifier delivery errors. Reported to the driver, never fatal to a tick.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The destination does not resolve to a live target (e.g. deleted
    /// channel). Reminder dispatch falls back to direct delivery.
    #[error("destination does not resolve to a live target: {0}")]
    UnknownDestination(String),

    /// Transport-level delivery failure. The event is dropped, not retried.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
