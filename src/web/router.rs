//! Router - dashboard page and Dash-style endpoints behind one trace layer.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::web::handlers::{dash_dependencies, dash_layout, dashboard, update_component};
use crate::web::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/", get(dashboard))
        // Dash-style JSON endpoints
        .route("/_dash-layout", get(dash_layout))
        .route("/_dash-dependencies", get(dash_dependencies))
        .route("/_dash-update-component", post(update_component))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
