//! Service descriptor and liveness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub title: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<&'static str>,
    /// Number of candidates the optimizer evaluates per request.
    pub optimizer_candidates: usize,
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        title: "Network Performance Optimizer",
        version: env!("CARGO_PKG_VERSION"),
        description: "Link health scoring, stream profile selection and bandwidth optimisation",
        endpoints: vec![
            "/analyze - Comprehensive network analysis",
            "/optimize - Network optimization recommendations",
            "/predict - Congestion prediction",
            "/metrics - Prometheus request counters",
            "/health - Liveness probe",
        ],
        optimizer_candidates: state.config().grid.points(),
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
