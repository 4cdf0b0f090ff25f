//! In-memory source.
//!
//! Responsibilities:
//! - Serve a replaceable map of entries, and optionally simulate an outage.
//!
//! Invariants:
//! - Clones share state: updating one handle is visible to the resolver
//!   holding another.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::resolver::{SourceError, SourceLoader};

#[derive(Debug, Default)]
struct State {
    values: HashMap<String, String>,
    outage: Option<String>,
}

/// A source backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    state: Arc<RwLock<State>>,
}

impl StaticSource {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = Self::default();
        source.replace(entries);
        source
    }

    /// Replace every entry.
    pub fn replace<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.write().values = values;
    }

    /// Make subsequent loads fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.write().outage = Some(message.into());
    }

    /// End a simulated outage.
    pub fn recover(&self) {
        self.write().outage = None;
    }

    // Updates always apply, even after a panicking writer poisoned the lock.
    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SourceLoader for StaticSource {
    fn load_all(&self, _source_name: &str) -> Result<HashMap<String, String>, SourceError> {
        let state = self
            .state
            .read()
            .map_err(|_| SourceError::Unavailable("source state poisoned".to_string()))?;
        match &state.outage {
            Some(message) => Err(SourceError::Unavailable(message.clone())),
            None => Ok(state.values.clone()),
        }
    }
}
