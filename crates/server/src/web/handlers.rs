//! HTTP handlers.
//!
//! Responsibilities:
//! - Serve the health, masked configuration, backend status and full status projections.
//! - Trigger an on-demand refresh.
//!
//! Does NOT handle:
//! - Masking or status logic; handlers delegate to the projection functions.
//!
//! Invariants:
//! - Each read handler loads one snapshot and projects only from it.
//! - Unmasked sensitive values are never serialized.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value};
use vault_demo_config::{
    HealthReport, RefreshReport, StatusReport, backend_status, config_view, health, status_report,
};

use super::state::AppState;

/// Liveness: GET /api/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(health(state.application()))
}

/// Declared keys with sensitive values masked: GET /api/config
pub async fn config(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, String>> {
    let snapshot = state.resolver().snapshot();
    Json(config_view(&snapshot, state.resolver().keys()))
}

/// Backend connectivity and secret availability: GET /api/vault-status
pub async fn vault_status(State(state): State<Arc<AppState>>) -> Json<Map<String, Value>> {
    let snapshot = state.resolver().snapshot();
    Json(backend_status(
        &snapshot,
        state.resolver().keys(),
        state.backend(),
    ))
}

/// Per-key resolution and source staleness: GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    let snapshot = state.resolver().snapshot();
    Json(status_report(&snapshot, state.resolver().keys()))
}

/// Reload every source now: POST /actuator/refresh
///
/// Always 200; failing sources are listed in the report and keep serving cached values.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshReport> {
    tracing::info!("Refresh requested over HTTP");
    Json(state.resolver().refresh().await)
}
