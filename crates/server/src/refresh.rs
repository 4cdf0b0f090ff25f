//! Periodic configuration refresh.
//!
//! Responsibilities:
//! - Drive `ConfigResolver::refresh()` on a fixed interval until shutdown.
//!
//! Does NOT handle:
//! - The initial load; `main` refreshes once before serving.
//!
//! Invariants:
//! - The first tick fires one full interval after spawn.
//! - A slow refresh delays the next tick rather than queueing a burst.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use vault_demo_config::ConfigResolver;

/// Spawn the refresh loop. It exits when `shutdown` flips to `true` or its sender drops.
pub fn spawn(
    resolver: Arc<ConfigResolver>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval = ?period, "Periodic refresh enabled");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = resolver.refresh().await;
                    if !report.is_clean() {
                        tracing::debug!(
                            stale = ?report.stale_sources,
                            "Periodic refresh left stale sources"
                        );
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("Periodic refresh stopped");
    })
}
