//! Server errors and process exit codes.
//!
//! Responsibilities:
//! - Define `ServerError` for startup and serving failures.
//! - Define structured exit codes that scripts and supervisors can act on.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Source failures during refresh; those degrade to stale data and never exit.
//!
//! Invariants:
//! - Exit code 2 is shared with clap's usage errors: both mean "fix the configuration".

use std::net::SocketAddr;

use thiserror::Error;
use vault_demo_config::{ConfigError, ResolverError};

/// Failures that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize configuration resolver: {0}")]
    Startup(#[from] ResolverError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Structured exit codes for vault-demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Clean shutdown.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Settings could not be loaded or failed validation.
    ConfigurationError = 2,

    /// The resolver could not be built (duplicate source, invalid key table).
    StartupError = 3,

    /// The listen address could not be bound.
    BindError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ServerError> for ExitCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::Config(_) => ExitCode::ConfigurationError,
            ServerError::Startup(_) => ExitCode::StartupError,
            ServerError::Bind { .. } => ExitCode::BindError,
            ServerError::Serve(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no `ServerError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ServerError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
