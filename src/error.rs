//! Error types for the telemetry source and the dashboard configuration.
//!
//! Neither kind is fatal to the sampling loop: source errors are folded into
//! the disconnected state by the connection monitor, and configuration errors
//! only surface at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to reach or understand the telemetry store.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("telemetry source unreachable: {0}")]
    Unreachable(String),
    #[error("malformed telemetry message: {0}")]
    Protocol(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        SourceError::Protocol(value.to_string())
    }
}

/// Failure to load or validate a [`DashboardConfig`](crate::config::DashboardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
