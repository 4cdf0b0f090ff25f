//! vault-demo - serve layered configuration and masked secrets over HTTP.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` values reach the env layer.
//! - Settings errors exit with code 2 before any listener is bound.

use clap::Parser;
use vault_demo_config::ConfigLoader;
use vault_demo_server::args::Cli;
use vault_demo_server::error::{ExitCode, ExitCodeExt, ServerError};
use vault_demo_server::{logging, run};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so settings can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    let log_format = match cli.log_format() {
        Ok(format) => format,
        Err(e) => {
            let e = ServerError::from(e);
            eprintln!("{}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };
    logging::init(log_format);

    let settings = match cli.load_settings().map_err(ServerError::from) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    let exit_code = match run(settings, shutdown_signal()).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
