//! Service settings types.
//!
//! Responsibilities:
//! - Define `SettingsFile`, the partial on-disk representation (every field optional).
//! - Define `Settings`, the fully resolved runtime settings produced by `ConfigLoader`.
//! - Provide the built-in key and source tables used when no file declares any.
//!
//! Does NOT handle:
//! - Reading files or environment variables (see `loader` module).
//! - Validation of bounds (see `loader::builder`).
//!
//! Invariants:
//! - Durations are stored on disk as whole seconds.
//! - `Settings::default()` reproduces the stock demo wiring.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    APP_SECRET_PATH, COMMON_SECRET_PATH, DEFAULT_APPLICATION_NAME, DEFAULT_BACKEND_LABEL,
    DEFAULT_BIND_ADDRESS, DEFAULT_KV_ROOT, DEFAULT_LOADER_TIMEOUT_SECS, NOT_FOUND,
};
use crate::types::key::KeyDeclaration;
use crate::types::source::SourceDeclaration;

/// Settings as written in a JSON or YAML settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    /// Application name reported by the health endpoint
    pub application: Option<String>,
    /// Backend label used in the status endpoint
    pub backend: Option<String>,
    /// HTTP bind address (e.g. "0.0.0.0:8080")
    pub bind: Option<String>,
    /// Directory holding file-backed KV documents
    pub kv_root: Option<PathBuf>,
    /// Bound on one loader call, in seconds
    pub loader_timeout_secs: Option<u64>,
    /// Periodic refresh interval in seconds; 0 disables it
    pub refresh_interval_secs: Option<u64>,
    /// Sources to register, in registration order
    pub sources: Option<Vec<SourceDeclaration>>,
    /// Keys the application reads
    pub keys: Option<Vec<KeyDeclaration>>,
}

/// Fully resolved service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub application: String,
    pub backend: String,
    pub bind: SocketAddr,
    pub kv_root: PathBuf,
    pub loader_timeout: Duration,
    /// `None` disables periodic refresh.
    pub refresh_interval: Option<Duration>,
    pub sources: Vec<SourceDeclaration>,
    pub keys: Vec<KeyDeclaration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            application: DEFAULT_APPLICATION_NAME.to_string(),
            backend: DEFAULT_BACKEND_LABEL.to_string(),
            bind: default_bind_address(),
            kv_root: PathBuf::from(DEFAULT_KV_ROOT),
            loader_timeout: Duration::from_secs(DEFAULT_LOADER_TIMEOUT_SECS),
            refresh_interval: None,
            sources: default_sources(),
            keys: default_keys(),
        }
    }
}

/// Default bind address, parsed from [`DEFAULT_BIND_ADDRESS`].
pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// The demo's secret paths: the application path overrides the shared one.
pub fn default_sources() -> Vec<SourceDeclaration> {
    vec![
        SourceDeclaration::file(APP_SECRET_PATH, 2),
        SourceDeclaration::file(COMMON_SECRET_PATH, 1),
    ]
}

/// The demo's declared keys.
pub fn default_keys() -> Vec<KeyDeclaration> {
    vec![
        KeyDeclaration::new("app.database.url", NOT_FOUND).with_label("database.url"),
        KeyDeclaration::new("app.database.username", NOT_FOUND).with_label("database.username"),
        KeyDeclaration::new("app.api.key", NOT_FOUND)
            .sensitive()
            .with_label("api.key"),
    ]
}
