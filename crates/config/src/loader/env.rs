//! Environment variable parsing for service settings.
//!
//! Responsibilities:
//! - Read and parse `VAULT_DEMO_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from settings files (see file.rs).
//! - Building the final Settings (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over settings file values.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const SETTINGS_PATH_VAR: &str = "VAULT_DEMO_SETTINGS_PATH";
pub const APPLICATION_VAR: &str = "VAULT_DEMO_APPLICATION";
pub const BACKEND_VAR: &str = "VAULT_DEMO_BACKEND";
pub const BIND_VAR: &str = "VAULT_DEMO_BIND";
pub const KV_ROOT_VAR: &str = "VAULT_DEMO_KV_ROOT";
pub const LOADER_TIMEOUT_VAR: &str = "VAULT_DEMO_LOADER_TIMEOUT";
pub const REFRESH_INTERVAL_VAR: &str = "VAULT_DEMO_REFRESH_INTERVAL";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_secs(var: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be a whole number of seconds".to_string(),
        })
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over settings file values.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(application) = env_var_or_none(APPLICATION_VAR) {
        loader.set_application(Some(application));
    }
    if let Some(backend) = env_var_or_none(BACKEND_VAR) {
        loader.set_backend(Some(backend));
    }
    if let Some(bind) = env_var_or_none(BIND_VAR) {
        loader.set_bind(Some(bind));
    }
    if let Some(root) = env_var_or_none(KV_ROOT_VAR) {
        loader.set_kv_root(Some(PathBuf::from(root)));
    }
    if let Some(timeout) = env_var_or_none(LOADER_TIMEOUT_VAR) {
        loader.set_loader_timeout(Some(parse_secs(LOADER_TIMEOUT_VAR, &timeout)?));
    }
    if let Some(interval) = env_var_or_none(REFRESH_INTERVAL_VAR) {
        loader.set_refresh_interval(Some(parse_secs(REFRESH_INTERVAL_VAR, &interval)?));
    }

    // Settings path from environment (only if not already set via CLI)
    if loader.settings_path().is_none()
        && let Some(path) = env_var_or_none(SETTINGS_PATH_VAR)
    {
        loader.set_settings_path(Some(PathBuf::from(path)));
    }

    Ok(())
}
