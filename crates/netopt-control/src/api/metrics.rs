//! Prometheus metrics endpoint.
//!
//! `GET /metrics` — request counters in Prometheus text exposition format.
//! No authentication (standard Prometheus practice).

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::metrics::render_prometheus;
use crate::state::AppState;

pub async fn handler(State(state): State<AppState>) -> impl IntoResponse {
    let out = render_prometheus(&state.metrics().snapshot());
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        out,
    )
}
