//! Dispatcher configuration
//!
//! Controls how an [`EventDispatcher`](crate::EventDispatcher) walks its
//! listener buckets and what happens when a listener panics. Configuration
//! can be built in code or loaded from JSON and TOML files.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a dispatcher walks a listener bucket while listeners may mutate it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationPolicy {
    /// Walk the live bucket by index, up to the length it had when the walk
    /// started.
    ///
    /// Listeners appended during the walk are not invoked by it. Removing a
    /// listener at or behind the cursor shifts the remaining ones left, so the
    /// next listener may be skipped. If the bucket shrinks below the cursor the
    /// walk ends early.
    #[default]
    Live,
    /// Clone the bucket before walking it.
    ///
    /// Every listener registered when the walk started runs exactly once, even
    /// if it is removed by an earlier listener.
    Snapshot,
}

/// What a dispatcher does when a listener panics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerPanicPolicy {
    /// Let the panic unwind out of `dispatch`
    #[default]
    Propagate,
    /// Catch the panic, log it and continue with the next listener
    Isolate,
}

impl std::fmt::Display for IterationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl std::fmt::Display for ListenerPanicPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propagate => write!(f, "propagate"),
            Self::Isolate => write!(f, "isolate"),
        }
    }
}

/// Configuration for an event dispatcher
///
/// Unknown keys are rejected when parsing, so a misspelled option is an error
/// instead of a silent default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Bucket iteration strategy.
    pub iteration: IterationPolicy,
    /// Listener panic handling.
    pub panic_policy: ListenerPanicPolicy,
    /// Emit a trace event for every listener invocation.
    pub trace_dispatch: bool,
}

impl DispatcherConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            ConfigError::Parse {
                format: "JSON",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match Format::of(path)? {
            Format::Json => Self::from_json_str(&content)?,
            Format::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                format: "TOML",
                reason: e.to_string(),
            })?,
        };

        tracing::debug!(path = %path.display(), ?config, "Loaded dispatcher config");
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match Format::of(path)? {
            Format::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                    format: "JSON",
                    reason: e.to_string(),
                })?
            }
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                format: "TOML",
                reason: e.to_string(),
            })?,
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> std::result::Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
