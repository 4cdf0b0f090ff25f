//! Settings loader for environment variables and files.
//!
//! Responsibilities:
//! - Load service settings from `.env` files, environment variables, and JSON/YAML settings files.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical settings merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Resolving application configuration values (see `resolver` module).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over settings file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod file;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::{
    APPLICATION_VAR, BACKEND_VAR, BIND_VAR, KV_ROOT_VAR, LOADER_TIMEOUT_VAR, REFRESH_INTERVAL_VAR,
    SETTINGS_PATH_VAR, env_var_or_none,
};
pub use error::ConfigError;
pub use file::{default_settings_path, parse_settings};
