//! Shared state for HTTP handlers.

use std::sync::Arc;

use vault_demo_config::{ConfigResolver, Settings};

/// State handed to every handler behind an `Arc`.
#[derive(Debug)]
pub struct AppState {
    resolver: Arc<ConfigResolver>,
    application: String,
    backend: String,
}

impl AppState {
    pub fn new(
        resolver: Arc<ConfigResolver>,
        application: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            application: application.into(),
            backend: backend.into(),
        }
    }

    /// State for a resolver built from `settings`.
    pub fn from_settings(resolver: Arc<ConfigResolver>, settings: &Settings) -> Self {
        Self::new(resolver, &settings.application, &settings.backend)
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }
}
