//! Error handling for the NovaDE core layer.
//!
//! The main error type for this crate is [`CoreError`], which encapsulates
//! the more specific [`ConfigError`] and [`LoggingError`]. Errors are defined
//! with `thiserror`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the notification listener infrastructure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while installing the global `tracing` subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem failures not covered by a more specific variant.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value parsed correctly but is out of range.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (XDG config or state home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The subscriber could not be installed, usually because one is already set.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// The configured level could not be turned into a filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}
