//! Configuration type definitions for vault-demo.
//!
//! Responsibilities:
//! - Define declared keys and the key table handed to the resolver.
//! - Define source declarations (name, priority, fetch kind).
//! - Define on-disk and resolved service settings with built-in defaults.
//!
//! Does NOT handle:
//! - Loading settings from files or environment variables (see `loader` module).
//! - Resolving or merging values (see `resolver` module).
//!
//! Invariants:
//! - Every declared key carries a static default; none is ever unbound.

mod key;
mod settings;
mod source;

pub use key::{KeyDeclaration, KeyTable};
pub use settings::{Settings, SettingsFile, default_bind_address, default_keys, default_sources};
pub use source::{SourceDeclaration, SourceKind};
