//! Settings file loading.
//!
//! Responsibilities:
//! - Locate the settings file (explicit path or platform config directory).
//! - Parse JSON or YAML settings files into `SettingsFile`.
//! - Apply file values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Settings (see builder.rs).
//!
//! Invariants:
//! - File values only fill fields that are still unset, so env vars and
//!   builder overrides win regardless of call order.
//! - An explicit settings path must exist; the default path may be absent.
//! - Parse errors report the path and line, never file content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::SettingsFile;

/// Returns the default path to the settings file.
///
/// - Linux: `~/.config/vault-demo/settings.yaml`
/// - macOS: `~/Library/Application Support/vault-demo/settings.yaml`
/// - Windows: `%AppData%\vault-demo\settings.yaml`
pub fn default_settings_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", "vault-demo")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("settings.yaml"))
}

/// Parse settings file content according to the file extension.
pub fn parse_settings(path: &Path, content: &str) -> Result<SettingsFile, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content).map_err(|e| ConfigError::SettingsParse {
            path: path.to_path_buf(),
            line: Some(e.line()),
        }),
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| ConfigError::SettingsParse {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
        }),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Read the settings file, if any, and apply it to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.settings_path() {
        Some(path) => (path.clone(), true),
        None => (
            default_settings_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?,
            false,
        ),
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if explicit {
                return Err(ConfigError::SettingsNotFound { path });
            }
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(());
        }
        Err(e) => {
            return Err(ConfigError::SettingsRead {
                path,
                kind: e.kind(),
            });
        }
    };

    let file = parse_settings(&path, &content)?;
    apply_settings_file(loader, file);
    tracing::debug!(path = %path.display(), "Loaded settings file");
    Ok(())
}

/// Fill unset loader fields from a parsed settings file.
fn apply_settings_file(loader: &mut ConfigLoader, file: SettingsFile) {
    if loader.application().is_none() {
        loader.set_application(file.application);
    }
    if loader.backend().is_none() {
        loader.set_backend(file.backend);
    }
    if loader.bind().is_none() {
        loader.set_bind(file.bind);
    }
    if loader.kv_root().is_none() {
        loader.set_kv_root(file.kv_root);
    }
    if loader.loader_timeout().is_none() {
        loader.set_loader_timeout(file.loader_timeout_secs.map(std::time::Duration::from_secs));
    }
    if loader.refresh_interval().is_none() {
        loader.set_refresh_interval(file.refresh_interval_secs.map(std::time::Duration::from_secs));
    }
    if loader.sources().is_none() {
        loader.set_sources(file.sources);
    }
    if loader.keys().is_none() {
        loader.set_keys(file.keys);
    }
}
