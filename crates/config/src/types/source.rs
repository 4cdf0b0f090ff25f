//! Source declarations.
//!
//! Responsibilities:
//! - Define `SourceDeclaration`: a named, prioritized backend to register with
//!   the resolver, plus how its entries are fetched.
//!
//! Does NOT handle:
//! - Fetching entries (see `sources` module).
//! - Rejecting duplicate names (the resolver does that at registration).
//!
//! Invariants:
//! - Higher `priority` overrides lower on key collision.
//! - `SourceKind::File` is the default so a bare `{name, priority}` entry
//!   describes a path in the file-backed KV store.
//! - `prefix` is only meaningful for `SourceKind::Env`; `path` only for
//!   `SourceKind::File`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a source fetches its entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A JSON or YAML document in the KV root, or at an explicit path.
    #[default]
    File,
    /// Process environment variables beginning with a prefix.
    Env,
}

/// A source to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeclaration {
    /// Source identifier, e.g. `secret/common`.
    pub name: String,
    /// Precedence rank.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub kind: SourceKind,
    /// Explicit document path for file sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Variable prefix for env sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl SourceDeclaration {
    /// Declare a file-backed source.
    pub fn file(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            kind: SourceKind::File,
            path: None,
            prefix: None,
        }
    }

    /// Declare an environment-variable source.
    pub fn env(name: impl Into<String>, priority: i32, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority,
            kind: SourceKind::Env,
            path: None,
            prefix: Some(prefix.into()),
        }
    }

    /// Point a file source at an explicit document.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}
