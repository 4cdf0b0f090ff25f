//! Externalized-configuration resolver.
//!
//! Responsibilities:
//! - Register named, prioritized sources and their loaders.
//! - Refresh all sources, merge them over the declared defaults and publish the
//!   result as an immutable snapshot.
//! - Answer point lookups (plain, masked, strict) against the current snapshot.
//!
//! Does NOT handle:
//! - Concrete backends (see `sources` module).
//! - HTTP or scheduling of periodic refreshes (see the server crate).
//!
//! Invariants:
//! - Readers never block: the snapshot lives in an `ArcSwap` and is replaced by
//!   a single pointer swap after the new view is fully built.
//! - Refreshes are serialized; at most one rebuilds the snapshot at a time.
//! - Lookups never fail; unresolved keys fall back to the caller's default.
//! - Only registration can fail fatally.

mod entry;
mod error;
mod mask;
mod source;
mod status;

#[cfg(test)]
mod tests;

pub use entry::{Entry, MergedConfig, SourceState};
pub use error::{ResolverError, SourceError};
pub use mask::mask;
pub use source::SourceLoader;
pub use status::{
    HealthReport, KeyStatus, STATUS_UP, StatusReport, backend_status, config_view, health,
    status_report,
};

use arc_swap::ArcSwap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::constants::DEFAULT_LOADER_TIMEOUT_SECS;
use crate::sources;
use crate::types::{KeyTable, Settings};
use source::RegisteredSource;

/// Outcome of one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Sources whose load failed this cycle and now serve cached data.
    pub stale_sources: BTreeSet<String>,
    /// Keys whose value or default flag changed.
    pub changed_keys: BTreeSet<String>,
    /// Generation of the snapshot published by this refresh.
    pub generation: u64,
}

impl RefreshReport {
    /// True when every source loaded successfully this cycle.
    pub fn is_clean(&self) -> bool {
        self.stale_sources.is_empty()
    }
}

/// Loads, merges and serves configuration from prioritized sources.
pub struct ConfigResolver {
    keys: KeyTable,
    loader_timeout: Duration,
    sources: Mutex<Vec<RegisteredSource>>,
    current: ArcSwap<MergedConfig>,
}

impl ConfigResolver {
    /// Create a resolver over `keys`. Each loader call is bounded by `loader_timeout`.
    ///
    /// The initial snapshot binds every declared key to its static default.
    pub fn new(keys: KeyTable, loader_timeout: Duration) -> Self {
        let initial = MergedConfig::defaults(&keys);
        Self {
            keys,
            loader_timeout,
            sources: Mutex::new(Vec::new()),
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Build a resolver from service settings, registering every declared
    /// source in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ResolverError` for invalid key declarations or a
    /// duplicate source name.
    pub fn from_settings(settings: &Settings) -> Result<Self, ResolverError> {
        let keys = KeyTable::new(settings.keys.clone())?;
        let mut resolver = Self::new(keys, settings.loader_timeout);
        for declaration in &settings.sources {
            resolver.register_source(
                &declaration.name,
                declaration.priority,
                sources::loader_for(declaration, &settings.kv_root),
            )?;
        }
        Ok(resolver)
    }

    /// Register a source. Its loader is first invoked by the next `refresh()`.
    ///
    /// Equal priorities are ordered by registration: the later source wins.
    ///
    /// # Errors
    ///
    /// `ResolverError::DuplicateSource` if `name` is already registered.
    pub fn register_source(
        &mut self,
        name: &str,
        priority: i32,
        loader: Arc<dyn SourceLoader>,
    ) -> Result<(), ResolverError> {
        let sources = self.sources.get_mut();
        if sources.iter().any(|s| s.name == name) {
            return Err(ResolverError::DuplicateSource(name.to_string()));
        }
        let sequence = sources.len() as u64;
        sources.push(RegisteredSource::new(name.to_string(), priority, sequence, loader));
        tracing::debug!(source = name, priority, "Registered configuration source");
        Ok(())
    }

    /// Reload every source and publish a new snapshot.
    ///
    /// A source that fails or times out keeps its previous values and is
    /// reported stale; the refresh itself never fails.
    pub async fn refresh(&self) -> RefreshReport {
        let mut sources = self.sources.lock().await;

        let outcomes =
            futures::future::join_all(sources.iter().map(|s| s.fetch(self.loader_timeout))).await;

        for (source, outcome) in sources.iter_mut().zip(outcomes.iter()) {
            if let Err(err) = outcome {
                tracing::warn!(
                    source = %source.name,
                    error = %err,
                    "Source refresh failed, serving cached values"
                );
            }
            source.apply(outcome);
        }

        let previous = self.current.load_full();
        let generation = previous.generation() + 1;
        let next = MergedConfig::build(
            &self.keys,
            sources.iter().map(RegisteredSource::layer).collect(),
            generation,
        );

        let report = RefreshReport {
            stale_sources: next.stale_sources(),
            changed_keys: next.changed_keys(&previous),
            generation,
        };
        self.current.store(Arc::new(next));
        drop(sources);

        tracing::info!(
            generation,
            stale = report.stale_sources.len(),
            changed = report.changed_keys.len(),
            "Configuration refreshed"
        );
        report
    }

    /// The current snapshot. Holding it pins one consistent view.
    pub fn snapshot(&self) -> Arc<MergedConfig> {
        self.current.load_full()
    }

    /// The declared keys.
    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    /// Upper bound on a single loader call.
    pub fn loader_timeout(&self) -> Duration {
        self.loader_timeout
    }

    /// Entry for `key` if a source supplied it; otherwise `default` with
    /// `default_used` set.
    pub fn get(&self, key: &str, default: &str) -> Entry {
        let snapshot = self.current.load();
        match snapshot.entry(key) {
            Some(entry) if !entry.default_used() => entry.clone(),
            _ => Entry::defaulted(default, self.keys.is_sensitive(key)),
        }
    }

    /// Like [`get`](Self::get), with a sensitive source-supplied value masked.
    ///
    /// Fallback defaults are returned as-is.
    pub fn get_masked(&self, key: &str, default: &str) -> Entry {
        let entry = self.get(key, default);
        if entry.sensitive() && !entry.default_used() {
            Entry::resolved(mask(entry.value()), true)
        } else {
            entry
        }
    }

    /// Entry for a declared or source-supplied key, applying the declared
    /// static default when unresolved.
    ///
    /// # Errors
    ///
    /// `ResolverError::KeyNotDeclared` when the key is neither declared nor supplied.
    pub fn get_strict(&self, key: &str) -> Result<Entry, ResolverError> {
        self.current
            .load()
            .entry(key)
            .cloned()
            .ok_or_else(|| ResolverError::KeyNotDeclared(key.to_string()))
    }

    /// True iff some source supplied `key`.
    pub fn is_resolved(&self, key: &str) -> bool {
        self.current
            .load()
            .entry(key)
            .is_some_and(|entry| !entry.default_used())
    }

    /// Names of sources whose last load failed.
    pub fn stale_sources(&self) -> BTreeSet<String> {
        self.current.load().stale_sources()
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("keys", &self.keys.len())
            .field("loader_timeout", &self.loader_timeout)
            .field("generation", &self.current.load().generation())
            .finish()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(
            KeyTable::default(),
            Duration::from_secs(DEFAULT_LOADER_TIMEOUT_SECS),
        )
    }
}
