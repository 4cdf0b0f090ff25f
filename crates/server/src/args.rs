//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn parsed arguments into service `Settings` via `ConfigLoader`.
//!
//! Non-responsibilities:
//! - Does not start the server (see `main.rs`).
//! - Does not read `.env` files; `main` does that before parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use vault_demo_config::{ConfigError, ConfigLoader, Settings, env_var_or_none};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "VAULT_DEMO_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "vault-demo")]
#[command(
    about = "Serve layered configuration and masked secrets over HTTP",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  vault-demo --kv-root ./secrets\n  vault-demo --settings ./settings.yaml --bind 0.0.0.0:8080\n  vault-demo --refresh-interval 30 --log-format json\n"
)]
pub struct Cli {
    /// Path to a settings file (JSON or YAML) [env: VAULT_DEMO_SETTINGS_PATH]
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080 [env: VAULT_DEMO_BIND]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Directory holding file-backed KV documents [env: VAULT_DEMO_KV_ROOT]
    #[arg(long, value_name = "DIR")]
    pub kv_root: Option<PathBuf>,

    /// Application name reported by /api/health [env: VAULT_DEMO_APPLICATION]
    #[arg(long)]
    pub application: Option<String>,

    /// Backend label used in /api/vault-status [env: VAULT_DEMO_BACKEND]
    #[arg(long)]
    pub backend: Option<String>,

    /// Bound on a single source load, in seconds [env: VAULT_DEMO_LOADER_TIMEOUT]
    #[arg(long, value_name = "SECS")]
    pub loader_timeout: Option<u64>,

    /// Periodic refresh interval in seconds, 0 disables [env: VAULT_DEMO_REFRESH_INTERVAL]
    #[arg(long, value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Log output format [env: VAULT_DEMO_LOG_FORMAT] [default: text]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Log format from `--log-format`, else `VAULT_DEMO_LOG_FORMAT`, else text.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` when the environment names an unknown format.
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        if let Some(format) = self.log_format {
            return Ok(format);
        }
        let Some(raw) = env_var_or_none(LOG_FORMAT_VAR) else {
            return Ok(LogFormat::default());
        };
        LogFormat::from_str(&raw, true).map_err(|_| ConfigError::InvalidValue {
            var: LOG_FORMAT_VAR.to_string(),
            message: "must be one of: text, json".to_string(),
        })
    }

    /// Resolve service settings: CLI args > env vars > settings file > defaults.
    ///
    /// Environment variables are read by `ConfigLoader::from_env`, which treats
    /// blank values as unset. Blank `--settings` values are ignored so the env
    /// var or default path applies.
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        let mut loader = ConfigLoader::new();

        if let Some(path) = &self.settings
            && !path.to_string_lossy().trim().is_empty()
        {
            loader = loader.with_settings_path(path.clone());
        }

        loader = loader.from_env()?.from_file()?;

        if let Some(application) = &self.application {
            loader = loader.with_application(application.clone());
        }
        if let Some(backend) = &self.backend {
            loader = loader.with_backend(backend.clone());
        }
        if let Some(bind) = &self.bind {
            loader = loader.with_bind(bind.clone());
        }
        if let Some(root) = &self.kv_root {
            loader = loader.with_kv_root(root.clone());
        }
        if let Some(secs) = self.loader_timeout {
            loader = loader.with_loader_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.refresh_interval {
            loader = loader.with_refresh_interval(Duration::from_secs(secs));
        }

        loader.build()
    }
}
