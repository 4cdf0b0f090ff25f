//! Route definitions, grouped by concern.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use super::state::AppState;

/// Read-only application endpoints.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/config", get(handlers::config))
        .route("/api/vault-status", get(handlers::vault_status))
        .route("/api/status", get(handlers::status))
}

/// Operational endpoints.
pub fn actuator_routes() -> Router<Arc<AppState>> {
    Router::new().route("/actuator/refresh", post(handlers::refresh))
}
