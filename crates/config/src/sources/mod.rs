//! Concrete source loaders.
//!
//! Responsibilities:
//! - Provide `SourceLoader` implementations: file-backed KV documents,
//!   prefixed environment variables, and an in-memory map.
//! - Build the loader matching a `SourceDeclaration`.
//!
//! Does NOT handle:
//! - Secret-store authentication or wire protocols; a remote store plugs in by
//!   implementing `SourceLoader`.

mod env;
mod file;
mod memory;

pub use env::{EnvSource, relaxed_key};
pub use file::FileSource;
pub use memory::StaticSource;

use std::path::Path;
use std::sync::Arc;

use crate::resolver::SourceLoader;
use crate::types::{SourceDeclaration, SourceKind};

/// Build the loader for `declaration`, resolving file documents under `kv_root`.
pub fn loader_for(declaration: &SourceDeclaration, kv_root: &Path) -> Arc<dyn SourceLoader> {
    match declaration.kind {
        SourceKind::File => match &declaration.path {
            Some(path) => Arc::new(FileSource::at_path(path.clone())),
            None => Arc::new(FileSource::new(kv_root)),
        },
        SourceKind::Env => Arc::new(EnvSource::new(
            declaration.prefix.clone().unwrap_or_default(),
        )),
    }
}
