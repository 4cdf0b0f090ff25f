//! Error types for settings loading.
//!
//! Responsibilities:
//! - Define error variants for every settings loading failure.
//!
//! Does NOT handle:
//! - Resolver errors (see `resolver::error`).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - Settings parse errors carry a line number, never the offending text.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),

    #[error("Settings file not found at {path}")]
    SettingsNotFound { path: PathBuf },

    #[error("Failed to read settings file at {path}: {kind}")]
    SettingsRead { path: PathBuf, kind: ErrorKind },

    #[error("Failed to parse settings file at {path}{}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    SettingsParse { path: PathBuf, line: Option<usize> },

    #[error("Unsupported settings file format '{extension}' at {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("invalid bind address '{value}'")]
    InvalidBindAddress { value: String },

    #[error("invalid loader timeout: {message}")]
    InvalidLoaderTimeout { message: String },

    #[error("invalid refresh interval: {message}")]
    InvalidRefreshInterval { message: String },

    #[error("invalid source '{name}': {message}")]
    InvalidSource { name: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
