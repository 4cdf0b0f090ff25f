//! Centralized constants for the vault-demo workspace.
//!
//! This module contains default values used across crates to avoid
//! magic string and number duplication.

// =============================================================================
// Application Defaults
// =============================================================================

/// Default application name reported by the health endpoint.
pub const DEFAULT_APPLICATION_NAME: &str = "spring-vault-demo";

/// Default backend label used in the `<backend>-connected` status field.
pub const DEFAULT_BACKEND_LABEL: &str = "vault";

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Default directory holding file-backed KV documents, relative to the working directory.
pub const DEFAULT_KV_ROOT: &str = "secrets";

/// Sentinel default applied to declared keys that no source supplies.
pub const NOT_FOUND: &str = "not-found";

/// Character used to mask sensitive values.
pub const MASK_CHAR: char = '*';

/// Prefix shared by all service environment variables.
pub const ENV_PREFIX: &str = "VAULT_DEMO_";

// =============================================================================
// Refresh & Timeout Defaults
// =============================================================================

/// Default bound on a single source loader call, in seconds.
pub const DEFAULT_LOADER_TIMEOUT_SECS: u64 = 5;

/// Maximum allowed loader timeout in seconds (5 minutes).
pub const MAX_LOADER_TIMEOUT_SECS: u64 = 300;

/// Maximum allowed periodic refresh interval in seconds (24 hours).
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86400;

// =============================================================================
// Built-in Source Table
// =============================================================================

/// Application-specific secret path. Registered above the shared path.
pub const APP_SECRET_PATH: &str = "secret/spring-vault-demo";

/// Secret path shared between applications.
pub const COMMON_SECRET_PATH: &str = "secret/common";
