//! vault-demo HTTP service.
//!
//! Responsibilities:
//! - Build the configuration resolver from service settings.
//! - Load every source once, then serve the HTTP surface.
//! - Run the optional periodic refresh until shutdown.
//!
//! Does NOT handle:
//! - Argument parsing or `.env` loading (see `main.rs` and `args`).
//! - Resolution semantics (see `vault_demo_config`).
//!
//! Invariants:
//! - A resolver construction error aborts startup before the listener binds.
//! - Failed sources at startup are logged and served as defaults; they never abort.

pub mod args;
pub mod error;
pub mod logging;
pub mod refresh;
pub mod web;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use vault_demo_config::{ConfigResolver, Settings};

use error::ServerError;
use web::AppState;

/// Start the service and run until `shutdown` resolves.
pub async fn run<F>(settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let resolver = Arc::new(ConfigResolver::from_settings(&settings).map_err(ServerError::from)?);

    let report = resolver.refresh().await;
    if !report.is_clean() {
        tracing::warn!(
            stale = ?report.stale_sources,
            "Some sources failed to load at startup; declared defaults apply"
        );
    }

    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: settings.bind,
            source,
        })?;
    let local_addr = listener.local_addr().context("reading bound address")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = settings
        .refresh_interval
        .map(|period| refresh::spawn(resolver.clone(), period, shutdown_rx));

    let app = web::router(Arc::new(AppState::from_settings(resolver, &settings)));
    tracing::info!(
        address = %local_addr,
        application = %settings.application,
        "Listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve);

    let _ = shutdown_tx.send(true);
    if let Some(handle) = refresher
        && let Err(e) = handle.await
    {
        tracing::warn!(error = %e, "Refresh task ended abnormally");
    }

    served?;
    tracing::info!("Shut down cleanly");
    Ok(())
}
