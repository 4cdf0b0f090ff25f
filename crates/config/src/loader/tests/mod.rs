//! Tests for the settings loader builder.
//!
//! Responsibilities:
//! - Test builder methods and defaults.
//! - Test settings file loading and precedence.
//! - Test environment variable handling and `.env` loading.
//! - Test bounds validation in `build()`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (tested in env.rs).
//! - Settings file parsing details (tested in file.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write a YAML settings file into `dir` and return its path.
pub fn write_settings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("settings.yaml");
    std::fs::write(&path, content).unwrap();
    path
}
