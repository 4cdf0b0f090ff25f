//! Tests for the configuration resolver.
//!
//! Responsibilities:
//! - Test registration and precedence rules.
//! - Test lookups: defaults, masking, strict and resolved checks.
//! - Test refresh semantics: partial failure, staleness, idempotence, timeouts.
//! - Test that concurrent readers only ever observe whole snapshots.
//!
//! Invariants:
//! - Sources are `StaticSource` handles so tests can change data between refreshes.

use std::sync::Arc;
use std::time::Duration;

use crate::resolver::ConfigResolver;
use crate::sources::StaticSource;
use crate::types::{KeyDeclaration, KeyTable};

pub mod refresh_tests;

/// Keys used across resolver tests.
pub fn test_keys() -> KeyTable {
    KeyTable::new(vec![
        KeyDeclaration::new("app.database.url", "not-found").with_label("database.url"),
        KeyDeclaration::new("app.database.username", "not-found"),
        KeyDeclaration::new("app.api.key", "not-found").sensitive(),
    ])
    .unwrap()
}

/// A resolver with the test keys and a short loader timeout.
pub fn resolver() -> ConfigResolver {
    ConfigResolver::new(test_keys(), Duration::from_millis(500))
}

/// Register `source` under `name`.
pub fn register(resolver: &mut ConfigResolver, name: &str, priority: i32, source: &StaticSource) {
    resolver
        .register_source(name, priority, Arc::new(source.clone()))
        .unwrap();
}
