//! Shared test utilities for vault-demo integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic binary command factory that prevents dotenv loading.
//! - Provide a router wired to in-memory sources.
//!
//! Invariants / Assumptions:
//! - Commands never read the developer's settings file; tests pass `--settings`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use assert_cmd::Command;
use axum::Router;
use vault_demo_config::sources::StaticSource;
use vault_demo_config::types::default_keys;
use vault_demo_config::{ConfigResolver, KeyTable};
use vault_demo_server::web::{self, AppState};

/// Returns a hermetic `vault-demo` command for integration testing.
pub fn vault_demo_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vault-demo");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    for var in [
        "VAULT_DEMO_SETTINGS_PATH",
        "VAULT_DEMO_APPLICATION",
        "VAULT_DEMO_BACKEND",
        "VAULT_DEMO_BIND",
        "VAULT_DEMO_KV_ROOT",
        "VAULT_DEMO_LOADER_TIMEOUT",
        "VAULT_DEMO_REFRESH_INTERVAL",
        "VAULT_DEMO_LOG_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");

    cmd
}

/// In-memory stand-ins for the demo's two secret paths.
pub struct Fixture {
    pub app: StaticSource,
    pub common: StaticSource,
    pub resolver: Arc<ConfigResolver>,
    pub router: Router,
}

/// Resolver over the demo's declared keys with two in-memory sources, not yet refreshed.
pub fn fixture() -> Fixture {
    let app = StaticSource::new([
        ("app.database.url", "jdbc:postgresql://app/db"),
        ("app.api.key", "secret123"),
    ]);
    let common = StaticSource::new([
        ("app.database.url", "jdbc:postgresql://common/db"),
        ("app.database.username", "demo"),
    ]);

    let keys = KeyTable::new(default_keys()).unwrap();
    let mut resolver = ConfigResolver::new(keys, Duration::from_millis(500));
    resolver
        .register_source("secret/common", 1, Arc::new(common.clone()))
        .unwrap();
    resolver
        .register_source("secret/spring-vault-demo", 2, Arc::new(app.clone()))
        .unwrap();
    let resolver = Arc::new(resolver);

    let state = AppState::new(resolver.clone(), "spring-vault-demo", "vault");
    let router = web::router(Arc::new(state));

    Fixture {
        app,
        common,
        resolver,
        router,
    }
}
