//! Error handling for tuna-events
//!
//! Dispatching never fails: cancellation and propagation are reported through
//! event flags and the boolean result of `dispatch`. The only fallible surface
//! is loading and saving dispatcher configuration.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
///
/// Represents failures while reading, parsing or writing a
/// [`DispatcherConfig`](crate::config::DispatcherConfig) file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written
    #[error("Failed to write config file {path}: {source}")]
    Write {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config contents are not valid for the detected format
    #[error("Invalid {format} config: {reason}")]
    Parse {
        /// Format name ("JSON" or "TOML").
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The config could not be serialized
    #[error("Failed to serialize config as {format}: {reason}")]
    Serialize {
        /// Format name ("JSON" or "TOML").
        format: &'static str,
        /// Serializer message.
        reason: String,
    },

    /// The file extension is neither `.json` nor `.toml`
    #[error("Unsupported config file format: {path}")]
    UnsupportedFormat {
        /// Path of the file.
        path: PathBuf,
    },
}

/// Main error type for tuna-events
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
