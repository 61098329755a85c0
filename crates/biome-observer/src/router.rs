//! Axum router construction for the Observer API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the animation page can be served from anywhere.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /api/health` -- liveness and published run id
/// - `GET /api/simulation` -- render feed of the published run
/// - `GET /api/state` -- final state document
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/simulation", get(handlers::get_simulation))
        .route("/api/state", get(handlers::get_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
