//! Core error types for SiteProbe.
//!
//! This module defines the central error type surfaced to callers of the
//! command-level entry points. Subsystem crates keep their own narrower
//! error enums and convert into [`SiteProbeError`] at the boundary.

use std::time::Duration;
use thiserror::Error;

/// Central error type for all SiteProbe operations.
#[derive(Error, Debug)]
pub enum SiteProbeError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network errors (HTTP requests, DNS, timeouts)
    #[error("network error: {0}")]
    Network(String),

    /// Validation errors (batch size, card count, malformed arguments)
    #[error("validation error: {0}")]
    Validation(String),

    /// The requester was rejected by the throttle
    #[error("too many requests, retry in {}s", retry_after.as_secs().max(1))]
    Throttled {
        /// Time until the requester may try again
        retry_after: Duration,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `SiteProbeError`.
pub type Result<T> = std::result::Result<T, SiteProbeError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
