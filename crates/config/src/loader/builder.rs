//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical settings merging.
//! - Support loading from `.env`, environment variables, settings files and
//!   direct builder methods.
//! - Validate bounds and build the final `Settings`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Settings file parsing logic (delegated to file.rs).
//! - Resolving configuration values (see `resolver` module).
//!
//! Invariants / Assumptions:
//! - Precedence: builder methods > environment variables > settings file > defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - A refresh interval of zero disables periodic refresh.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{MAX_LOADER_TIMEOUT_SECS, MAX_REFRESH_INTERVAL_SECS};
use crate::types::{KeyDeclaration, Settings, SourceDeclaration, SourceKind};

/// Settings loader that builds service settings from env vars and files.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    settings_path: Option<PathBuf>,
    application: Option<String>,
    backend: Option<String>,
    bind: Option<String>,
    kv_root: Option<PathBuf>,
    loader_timeout: Option<Duration>,
    refresh_interval: Option<Duration>,
    sources: Option<Vec<SourceDeclaration>>,
    keys: Option<Vec<KeyDeclaration>>,
}

impl ConfigLoader {
    /// Create a new settings loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read settings from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Read settings from the settings file.
    ///
    /// Only fields not already set are filled in.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Use an explicit settings file. It must exist when `from_file()` runs.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Set the application name.
    pub fn with_application(mut self, application: String) -> Self {
        self.application = Some(application);
        self
    }

    /// Set the backend label.
    pub fn with_backend(mut self, backend: String) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the HTTP bind address.
    pub fn with_bind(mut self, bind: String) -> Self {
        self.bind = Some(bind);
        self
    }

    /// Set the KV root directory.
    pub fn with_kv_root(mut self, root: PathBuf) -> Self {
        self.kv_root = Some(root);
        self
    }

    /// Set the loader timeout.
    pub fn with_loader_timeout(mut self, timeout: Duration) -> Self {
        self.loader_timeout = Some(timeout);
        self
    }

    /// Set the periodic refresh interval. Zero disables it.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Replace the source table.
    pub fn with_sources(mut self, sources: Vec<SourceDeclaration>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Replace the declared key table.
    pub fn with_keys(mut self, keys: Vec<KeyDeclaration>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Build the final settings, applying defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable bind address, out-of-range timeout or
    /// interval, or an env source without a prefix.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();

        let bind = match self.bind {
            Some(raw) => parse_bind(&raw)?,
            None => defaults.bind,
        };

        let loader_timeout = self.loader_timeout.unwrap_or(defaults.loader_timeout);
        Self::validate_loader_timeout(loader_timeout)?;

        let refresh_interval = self.refresh_interval.filter(|i| !i.is_zero());
        if let Some(interval) = refresh_interval {
            Self::validate_refresh_interval(interval)?;
        }

        let sources = self.sources.unwrap_or(defaults.sources);
        for source in &sources {
            Self::validate_source(source)?;
        }

        Ok(Settings {
            application: self.application.unwrap_or(defaults.application),
            backend: self.backend.unwrap_or(defaults.backend),
            bind,
            kv_root: self.kv_root.unwrap_or(defaults.kv_root),
            loader_timeout,
            refresh_interval,
            sources,
            keys: self.keys.unwrap_or(defaults.keys),
        })
    }

    fn validate_loader_timeout(timeout: Duration) -> Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidLoaderTimeout {
                message: "must be greater than 0".to_string(),
            });
        }
        if timeout.as_secs() > MAX_LOADER_TIMEOUT_SECS {
            return Err(ConfigError::InvalidLoaderTimeout {
                message: format!(
                    "{}s exceeds maximum of {}s",
                    timeout.as_secs(),
                    MAX_LOADER_TIMEOUT_SECS
                ),
            });
        }
        Ok(())
    }

    fn validate_refresh_interval(interval: Duration) -> Result<(), ConfigError> {
        if interval.as_secs() > MAX_REFRESH_INTERVAL_SECS {
            return Err(ConfigError::InvalidRefreshInterval {
                message: format!(
                    "{}s exceeds maximum of {}s",
                    interval.as_secs(),
                    MAX_REFRESH_INTERVAL_SECS
                ),
            });
        }
        if interval < Duration::from_secs(1) {
            return Err(ConfigError::InvalidRefreshInterval {
                message: "must be at least 1s".to_string(),
            });
        }
        Ok(())
    }

    fn validate_source(source: &SourceDeclaration) -> Result<(), ConfigError> {
        if source.name.trim().is_empty() {
            return Err(ConfigError::InvalidSource {
                name: source.name.clone(),
                message: "name must not be empty".to_string(),
            });
        }
        if source.kind == SourceKind::Env
            && source.prefix.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(ConfigError::InvalidSource {
                name: source.name.clone(),
                message: "env sources require a prefix".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn settings_path(&self) -> Option<&PathBuf> {
        self.settings_path.as_ref()
    }

    pub(crate) fn application(&self) -> Option<&String> {
        self.application.as_ref()
    }

    pub(crate) fn backend(&self) -> Option<&String> {
        self.backend.as_ref()
    }

    pub(crate) fn bind(&self) -> Option<&String> {
        self.bind.as_ref()
    }

    pub(crate) fn kv_root(&self) -> Option<&PathBuf> {
        self.kv_root.as_ref()
    }

    pub(crate) fn loader_timeout(&self) -> Option<Duration> {
        self.loader_timeout
    }

    pub(crate) fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval
    }

    pub(crate) fn sources(&self) -> Option<&Vec<SourceDeclaration>> {
        self.sources.as_ref()
    }

    pub(crate) fn keys(&self) -> Option<&Vec<KeyDeclaration>> {
        self.keys.as_ref()
    }

    pub(crate) fn set_settings_path(&mut self, path: Option<PathBuf>) {
        self.settings_path = path;
    }

    pub(crate) fn set_application(&mut self, application: Option<String>) {
        self.application = application;
    }

    pub(crate) fn set_backend(&mut self, backend: Option<String>) {
        self.backend = backend;
    }

    pub(crate) fn set_bind(&mut self, bind: Option<String>) {
        self.bind = bind;
    }

    pub(crate) fn set_kv_root(&mut self, root: Option<PathBuf>) {
        self.kv_root = root;
    }

    pub(crate) fn set_loader_timeout(&mut self, timeout: Option<Duration>) {
        self.loader_timeout = timeout;
    }

    pub(crate) fn set_refresh_interval(&mut self, interval: Option<Duration>) {
        self.refresh_interval = interval;
    }

    pub(crate) fn set_sources(&mut self, sources: Option<Vec<SourceDeclaration>>) {
        self.sources = sources;
    }

    pub(crate) fn set_keys(&mut self, keys: Option<Vec<KeyDeclaration>>) {
        self.keys = keys;
    }
}

/// Parse a bind address, accepting a bare port (`8080`) as `0.0.0.0:8080`.
fn parse_bind(raw: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(port) = trimmed.parse::<u16>() {
        return Ok(SocketAddr::from(([0, 0, 0, 0], port)));
    }
    trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidBindAddress {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_forms() {
        assert_eq!(parse_bind("9000").unwrap().to_string(), "0.0.0.0:9000");
        assert_eq!(
            parse_bind(" 127.0.0.1:8081 ").unwrap().to_string(),
            "127.0.0.1:8081"
        );
        assert!(matches!(
            parse_bind("localhost"),
            Err(ConfigError::InvalidBindAddress { .. })
        ));
    }
}
