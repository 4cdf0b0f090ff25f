//! Layered configuration resolution for the vault demo service.
//!
//! This crate provides the settings loader (env vars, `.env`, settings files),
//! the layered configuration resolver with prioritized sources and atomic
//! refresh, the built-in source loaders, and the read-only projections the
//! HTTP surface serves.

pub mod constants;
mod loader;
pub mod resolver;
pub mod sources;
pub mod types;

pub use loader::{
    APPLICATION_VAR, BACKEND_VAR, BIND_VAR, ConfigError, ConfigLoader, KV_ROOT_VAR,
    LOADER_TIMEOUT_VAR, REFRESH_INTERVAL_VAR, SETTINGS_PATH_VAR, default_settings_path,
    env_var_or_none, parse_settings,
};
pub use resolver::{
    ConfigResolver, Entry, HealthReport, KeyStatus, MergedConfig, RefreshReport, ResolverError,
    SourceError, SourceLoader, SourceState, StatusReport, backend_status, config_view, health,
    mask, status_report,
};
pub use types::{KeyDeclaration, KeyTable, Settings, SettingsFile, SourceDeclaration, SourceKind};
