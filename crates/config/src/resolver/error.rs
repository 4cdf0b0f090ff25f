//! Error types for the configuration resolver.
//!
//! Responsibilities:
//! - Define the resolver taxonomy: fatal registration/declaration errors,
//!   recoverable per-source load failures, strict lookup misses.
//! - Define `SourceError`, the failure type returned by `SourceLoader`s.
//!
//! Does NOT handle:
//! - Settings loading errors (see `loader::error`).
//!
//! Invariants:
//! - No variant carries a configuration value; only names, paths and messages.
//! - `SourceUnavailable` is never returned from lookups, only surfaced through
//!   refresh reports and logs.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// A source with this name is already registered. Fatal at startup.
    #[error("Source '{0}' is already registered")]
    DuplicateSource(String),

    /// A source could not be loaded during a refresh. The source keeps its last
    /// good values and is marked stale.
    #[error("Source '{source_name}' is unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// Strict lookup of a key that is neither declared nor supplied by any source.
    #[error("Key '{0}' is not declared")]
    KeyNotDeclared(String),

    /// A key was declared twice.
    #[error("Key '{0}' is declared more than once")]
    DuplicateKey(String),

    /// A declared key name is empty or contains whitespace.
    #[error("Invalid key name: '{0}'")]
    InvalidKey(String),
}

/// Errors returned by source loaders.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backing document or entry does not exist.
    #[error("No data found at {0}")]
    NotFound(PathBuf),

    /// The backing document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document is not a valid key/value document.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The loader did not answer within its time bound.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Any other backend failure.
    #[error("{0}")]
    Unavailable(String),
}

impl ResolverError {
    /// Wrap a loader failure for the named source.
    pub fn unavailable(source_name: &str, error: &SourceError) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.to_string(),
            message: error.to_string(),
        }
    }

    /// Whether the error should abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DuplicateSource(_) | Self::DuplicateKey(_) | Self::InvalidKey(_)
        )
    }
}
