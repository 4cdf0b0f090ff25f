//! Health and status projections.
//!
//! Responsibilities:
//! - Project one `MergedConfig` plus the declared `KeyTable` into the shapes the
//!   HTTP layer serves: health, masked configuration, backend status, full report.
//!
//! Does NOT handle:
//! - Routing or serialization to the wire (see the server crate).
//! - Reading the live snapshot; callers pass the snapshot they hold.
//!
//! Invariants:
//! - Every function here is pure over its inputs.
//! - Sensitive source-supplied values only ever leave this module masked.
//! - Liveness is always true; a constructed resolver is alive by definition.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use super::entry::{Entry, MergedConfig, SourceState};
use crate::types::{KeyDeclaration, KeyTable};

/// Value reported by the health endpoint.
pub const STATUS_UP: &str = "UP";

/// Response body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub application: String,
}

/// Per-key status within a [`StatusReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub key: String,
    pub resolved: bool,
    pub default_used: bool,
    pub sensitive: bool,
    /// Masked when the key is sensitive and source-supplied.
    pub value: String,
}

/// Full projection of one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub live: bool,
    pub generation: u64,
    pub keys: BTreeMap<String, KeyStatus>,
    pub stale_sources: BTreeSet<String>,
    pub sources: Vec<SourceState>,
}

/// Liveness of the service.
pub fn health(application: &str) -> HealthReport {
    HealthReport {
        status: STATUS_UP.to_string(),
        application: application.to_string(),
    }
}

fn declared_entry(snapshot: &MergedConfig, declaration: &KeyDeclaration) -> Entry {
    snapshot
        .entry(&declaration.key)
        .cloned()
        .unwrap_or_else(|| Entry::defaulted(declaration.default.clone(), declaration.sensitive))
}

/// Declared keys by display name, with sensitive values masked.
pub fn config_view(snapshot: &MergedConfig, keys: &KeyTable) -> BTreeMap<String, String> {
    keys.iter()
        .map(|declaration| {
            let entry = declared_entry(snapshot, declaration);
            (
                declaration.display_name().to_string(),
                entry.display_value(),
            )
        })
        .collect()
}

/// Resolution status of every declared key plus source staleness.
pub fn status_report(snapshot: &MergedConfig, keys: &KeyTable) -> StatusReport {
    let keys = keys
        .iter()
        .map(|declaration| {
            let entry = declared_entry(snapshot, declaration);
            let status = KeyStatus {
                key: declaration.key.clone(),
                resolved: !entry.default_used(),
                default_used: entry.default_used(),
                sensitive: entry.sensitive(),
                value: entry.display_value(),
            };
            (declaration.display_name().to_string(), status)
        })
        .collect();

    StatusReport {
        live: true,
        generation: snapshot.generation(),
        keys,
        stale_sources: snapshot.stale_sources(),
        sources: snapshot.sources().to_vec(),
    }
}

/// `{"<backend>-connected": bool, "secrets-loaded": bool}`.
///
/// Connected means at least one backend source loaded successfully on its last
/// attempt; local sources such as the environment never count.
/// Secrets are loaded when at least one key is declared sensitive and every
/// sensitive key is supplied by a source.
pub fn backend_status(
    snapshot: &MergedConfig,
    keys: &KeyTable,
    backend: &str,
) -> Map<String, Value> {
    let connected = snapshot.sources().iter().any(|s| s.backend && !s.stale);

    let mut sensitive = keys.iter().filter(|d| d.sensitive).peekable();
    let secrets_loaded = sensitive.peek().is_some()
        && sensitive.all(|d| !declared_entry(snapshot, d).default_used());

    let mut status = Map::new();
    status.insert(format!("{backend}-connected"), Value::Bool(connected));
    status.insert("secrets-loaded".to_string(), Value::Bool(secrets_loaded));
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::entry::SourceLayer;
    use std::collections::HashMap;

    fn table() -> KeyTable {
        KeyTable::new(crate::types::default_keys()).unwrap()
    }

    fn snapshot_with(keys: &KeyTable, pairs: &[(&str, &str)], stale: bool) -> MergedConfig {
        layered(keys, pairs, stale, true)
    }

    fn layered(
        keys: &KeyTable,
        pairs: &[(&str, &str)],
        stale: bool,
        backend: bool,
    ) -> MergedConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let layer = SourceLayer {
            sequence: 0,
            values: &values,
            state: SourceState {
                name: "secret/spring-vault-demo".to_string(),
                priority: 1,
                backend,
                stale,
                last_loaded: None,
                last_error: None,
                key_count: values.len(),
            },
        };
        MergedConfig::build(keys, vec![layer], 1)
    }

    #[test]
    fn test_health_is_up() {
        let report = health("spring-vault-demo");
        assert_eq!(report.status, "UP");
        assert_eq!(report.application, "spring-vault-demo");
    }

    #[test]
    fn test_config_view_masks_supplied_secret() {
        let keys = table();
        let snapshot = snapshot_with(
            &keys,
            &[
                ("app.database.url", "jdbc:postgresql://db:5432/demo"),
                ("app.api.key", "secret123"),
            ],
            false,
        );

        let view = config_view(&snapshot, &keys);
        assert_eq!(view["database.url"], "jdbc:postgresql://db:5432/demo");
        assert_eq!(view["database.username"], "not-found");
        assert_eq!(view["api.key"], "*********");
    }

    #[test]
    fn test_config_view_leaves_default_sentinel_unmasked() {
        let keys = table();
        let view = config_view(&MergedConfig::defaults(&keys), &keys);
        assert_eq!(view["api.key"], "not-found");
    }

    #[test]
    fn test_status_report_flags() {
        let keys = table();
        let snapshot = snapshot_with(&keys, &[("app.api.key", "k")], true);
        let report = status_report(&snapshot, &keys);

        assert!(report.live);
        assert_eq!(report.generation, 1);
        assert!(report.keys["api.key"].resolved);
        assert!(!report.keys["api.key"].default_used);
        assert_eq!(report.keys["api.key"].value, "*");
        assert!(report.keys["database.url"].default_used);
        assert!(report.stale_sources.contains("secret/spring-vault-demo"));
    }

    #[test]
    fn test_backend_status_shape() {
        let keys = table();
        let snapshot = snapshot_with(
            &keys,
            &[("app.database.url", "jdbc:h2:mem"), ("app.api.key", "k")],
            false,
        );
        let status = backend_status(&snapshot, &keys, "vault");

        assert_eq!(status.len(), 2);
        assert_eq!(status["vault-connected"], Value::Bool(true));
        assert_eq!(status["secrets-loaded"], Value::Bool(true));
    }

    #[test]
    fn test_backend_status_before_first_load() {
        let keys = table();
        let status = backend_status(&MergedConfig::defaults(&keys), &keys, "vault");
        assert_eq!(status["vault-connected"], Value::Bool(false));
        assert_eq!(status["secrets-loaded"], Value::Bool(false));
    }

    #[test]
    fn test_local_source_does_not_mark_backend_connected() {
        let keys = table();
        let pairs = [("app.database.url", "jdbc:h2:mem")];
        let snapshot = layered(&keys, &pairs, false, false);
        let status = backend_status(&snapshot, &keys, "vault");
        assert_eq!(status["vault-connected"], Value::Bool(false));
    }

    #[test]
    fn test_secrets_not_loaded_without_sensitive_keys() {
        let keys = KeyTable::new(vec![KeyDeclaration::new("a", "d")]).unwrap();
        let snapshot = snapshot_with(&keys, &[("a", "1")], false);
        let status = backend_status(&snapshot, &keys, "kv");
        assert_eq!(status["kv-connected"], Value::Bool(true));
        assert_eq!(status["secrets-loaded"], Value::Bool(false));
    }
}
