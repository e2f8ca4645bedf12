//! Network Performance Optimizer service library.
//!
//! Re-exports the API router, shared state, configuration and metrics so
//! they can be used by integration tests (and embedded in other binaries).

pub mod api;
pub mod config;
pub mod metrics;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router with tracing and (optionally) CORS layers.
pub fn app(state: state::AppState) -> Router {
    let cors = state.config().server.cors_permissive;
    let router = api::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
