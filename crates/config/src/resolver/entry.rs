//! Resolved entries and the merged snapshot.
//!
//! Responsibilities:
//! - Define `Entry`, a single resolved key with its provenance flags.
//! - Define `MergedConfig`, the immutable snapshot produced by each refresh.
//! - Fold sources in precedence order over the declared defaults.
//!
//! Does NOT handle:
//! - Invoking loaders or publishing snapshots (see `resolver` module root).
//! - Masking (see `mask`).
//!
//! Invariants:
//! - Every declared key is present in a `MergedConfig`, bound to a source value
//!   or to its static default.
//! - Sources are folded in ascending `(priority, registration sequence)` order,
//!   so the last writer of a key is the highest-precedence source.
//! - Values are held in `SecretString`; `Debug` never prints a sensitive value.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::types::KeyTable;

fn secret(value: String) -> SecretString {
    SecretString::new(value.into())
}

/// A single resolved key.
#[derive(Clone)]
pub struct Entry {
    value: SecretString,
    default_used: bool,
    sensitive: bool,
}

impl Entry {
    /// An entry supplied by a source.
    pub fn resolved(value: impl Into<String>, sensitive: bool) -> Self {
        Self {
            value: secret(value.into()),
            default_used: false,
            sensitive,
        }
    }

    /// An entry bound to a fallback default.
    pub fn defaulted(value: impl Into<String>, sensitive: bool) -> Self {
        Self {
            value: secret(value.into()),
            default_used: true,
            sensitive,
        }
    }

    /// The raw value.
    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }

    /// True when no source supplied the key.
    pub fn default_used(&self) -> bool {
        self.default_used
    }

    /// True when the key is declared sensitive.
    pub fn sensitive(&self) -> bool {
        self.sensitive
    }

    /// The value as it may be shown to an operator.
    ///
    /// Sensitive values are masked unless they come from a static default.
    pub fn display_value(&self) -> String {
        if self.sensitive && !self.default_used {
            super::mask::mask(self.value())
        } else {
            self.value().to_string()
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.default_used == other.default_used
            && self.sensitive == other.sensitive
            && self.value() == other.value()
    }
}

impl Eq for Entry {}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.sensitive {
            "[REDACTED]"
        } else {
            self.value()
        };
        f.debug_struct("Entry")
            .field("value", &value)
            .field("default_used", &self.default_used)
            .field("sensitive", &self.sensitive)
            .finish()
    }
}

/// Per-source state captured when a snapshot was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceState {
    pub name: String,
    pub priority: i32,
    /// True for secret-store sources, false for local ones such as the environment.
    pub backend: bool,
    /// True when the last load attempt failed (or none has succeeded yet).
    pub stale: bool,
    pub last_loaded: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Number of keys currently cached for this source.
    pub key_count: usize,
}

/// Input to [`MergedConfig::build`]: one source's cached values and state.
pub(crate) struct SourceLayer<'a> {
    pub sequence: u64,
    pub values: &'a HashMap<String, String>,
    pub state: SourceState,
}

/// The flattened, priority-resolved view over all sources plus defaults.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    entries: BTreeMap<String, Entry>,
    sources: Vec<SourceState>,
    generation: u64,
    built_at: DateTime<Utc>,
}

impl MergedConfig {
    /// Snapshot containing only declared defaults; published before the first refresh.
    pub fn defaults(keys: &KeyTable) -> Self {
        Self::build(keys, Vec::new(), 0)
    }

    pub(crate) fn build(
        keys: &KeyTable,
        mut layers: Vec<SourceLayer<'_>>,
        generation: u64,
    ) -> Self {
        let mut entries: BTreeMap<String, Entry> = keys
            .iter()
            .map(|d| {
                let entry = Entry::defaulted(d.default.clone(), d.sensitive);
                (d.key.clone(), entry)
            })
            .collect();

        layers.sort_by_key(|layer| (layer.state.priority, layer.sequence));
        for layer in &layers {
            for (key, value) in layer.values {
                let entry = Entry::resolved(value.clone(), keys.is_sensitive(key));
                entries.insert(key.clone(), entry);
            }
        }

        // Reported in registration order.
        layers.sort_by_key(|layer| layer.sequence);
        Self {
            entries,
            sources: layers.into_iter().map(|layer| layer.state).collect(),
            generation,
            built_at: Utc::now(),
        }
    }

    /// Entry for `key`, including declared keys bound to their static default.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// All entries, ordered by key.
    pub fn entries(&self) -> &BTreeMap<String, Entry> {
        &self.entries
    }

    /// Source states in registration order.
    pub fn sources(&self) -> &[SourceState] {
        &self.sources
    }

    /// Names of sources whose last load failed.
    pub fn stale_sources(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .filter(|s| s.stale)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Refresh generation; 0 for the defaults-only snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Keys whose value or default flag differs between `self` and `other`.
    pub fn changed_keys(&self, other: &MergedConfig) -> BTreeSet<String> {
        let mut changed = BTreeSet::new();
        for (key, entry) in &self.entries {
            if other.entries.get(key) != Some(entry) {
                changed.insert(key.clone());
            }
        }
        for key in other.entries.keys() {
            if !self.entries.contains_key(key) {
                changed.insert(key.clone());
            }
        }
        changed
    }
}
