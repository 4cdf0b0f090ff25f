//! Environment-variable source.
//!
//! Responsibilities:
//! - Expose process environment variables that start with a prefix as
//!   configuration entries with relaxed key binding.
//!
//! Does NOT handle:
//! - Service settings overrides (`VAULT_DEMO_*`, see `loader::env`).
//!
//! Invariants:
//! - `APP_DATABASE_URL` binds to `app.database.url`: lowercase, `_` -> `.`.
//! - The prefix is part of the bound key, so prefix `APP_` yields keys under `app.`.
//! - Empty or whitespace-only values are treated as unset; values are trimmed.
//! - Never counts as a backend source, so it cannot mark the backend connected.

use std::collections::HashMap;

use crate::loader::env_var_or_none;
use crate::resolver::{SourceError, SourceLoader};

/// Loads entries from environment variables beginning with a prefix.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Relaxed binding of a variable name to a dotted key.
pub fn relaxed_key(var: &str) -> String {
    var.trim_matches('_')
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(".")
}

impl SourceLoader for EnvSource {
    fn load_all(&self, _source_name: &str) -> Result<HashMap<String, String>, SourceError> {
        let values = std::env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .filter(|name| name.starts_with(&self.prefix))
            .filter_map(|name| env_var_or_none(&name).map(|value| (relaxed_key(&name), value)))
            .collect();
        Ok(values)
    }

    fn is_backend(&self) -> bool {
        false
    }
}
