//! Registered sources and the loader seam.
//!
//! Responsibilities:
//! - Define `SourceLoader`, the opaque `loadAll(sourceName)` collaborator.
//! - Track each registered source's cached values and staleness.
//! - Run one bounded load attempt per refresh.
//!
//! Does NOT handle:
//! - Concrete backends (see the crate-level `sources` module).
//! - Merging (see `entry`).
//!
//! Invariants:
//! - A failed load never clears cached values; it only marks the source stale.
//! - A load that exceeds the caller's timeout counts as a failure for that cycle.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::entry::{SourceLayer, SourceState};
use super::error::{ResolverError, SourceError};

/// Fetches every entry of a named source.
///
/// Implementations are synchronous; the resolver runs them on the blocking
/// pool and bounds them with its loader timeout.
pub trait SourceLoader: Send + Sync {
    fn load_all(&self, source_name: &str) -> Result<HashMap<String, String>, SourceError>;

    /// True when entries come from the secret-store backend.
    ///
    /// Only backend sources count towards `<backend>-connected`.
    fn is_backend(&self) -> bool {
        true
    }
}

impl<F> SourceLoader for F
where
    F: Fn(&str) -> Result<HashMap<String, String>, SourceError> + Send + Sync,
{
    fn load_all(&self, source_name: &str) -> Result<HashMap<String, String>, SourceError> {
        self(source_name)
    }
}

/// A source known to the resolver.
pub(crate) struct RegisteredSource {
    pub name: String,
    pub priority: i32,
    pub sequence: u64,
    backend: bool,
    loader: Arc<dyn SourceLoader>,
    values: HashMap<String, String>,
    stale: bool,
    last_loaded: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl RegisteredSource {
    pub fn new(name: String, priority: i32, sequence: u64, loader: Arc<dyn SourceLoader>) -> Self {
        Self {
            name,
            priority,
            sequence,
            backend: loader.is_backend(),
            loader,
            values: HashMap::new(),
            // Nothing has been loaded yet.
            stale: true,
            last_loaded: None,
            last_error: None,
        }
    }

    /// Invoke the loader on the blocking pool, bounded by `timeout`.
    pub async fn fetch(
        &self,
        timeout: Duration,
    ) -> Result<HashMap<String, String>, ResolverError> {
        let loader = Arc::clone(&self.loader);
        let name = self.name.clone();
        let task = tokio::task::spawn_blocking(move || loader.load_all(&name));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(values))) => Ok(values),
            Ok(Ok(Err(err))) => Err(ResolverError::unavailable(&self.name, &err)),
            Ok(Err(join_err)) => Err(ResolverError::SourceUnavailable {
                source_name: self.name.clone(),
                message: format!("loader panicked: {join_err}"),
            }),
            Err(_) => Err(ResolverError::unavailable(
                &self.name,
                &SourceError::Timeout(timeout),
            )),
        }
    }

    /// Record the outcome of a load attempt.
    pub fn apply(&mut self, outcome: &Result<HashMap<String, String>, ResolverError>) {
        match outcome {
            Ok(values) => {
                self.values = values.clone();
                self.stale = false;
                self.last_loaded = Some(Utc::now());
                self.last_error = None;
            }
            Err(err) => {
                self.stale = true;
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn layer(&self) -> SourceLayer<'_> {
        SourceLayer {
            sequence: self.sequence,
            values: &self.values,
            state: SourceState {
                name: self.name.clone(),
                priority: self.priority,
                backend: self.backend,
                stale: self.stale,
                last_loaded: self.last_loaded,
                last_error: self.last_error.clone(),
                key_count: self.values.len(),
            },
        }
    }
}
