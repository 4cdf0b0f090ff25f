//! HTTP surface over the configuration resolver.
//!
//! Responsibilities:
//! - Assemble the axum `Router` from route groups and shared state.
//!
//! Does NOT handle:
//! - Binding or serving; `main` owns the listener and shutdown.
//! - Authentication; every endpoint is public and read-only except refresh.

mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use axum::Router;

pub use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::actuator_routes())
        .with_state(state)
}
