//! REST API route tree.
//!
//! GET  /         — service descriptor
//! GET  /health   — liveness probe
//! POST /analyze  — score, stream profile and bandwidth headroom
//! POST /optimize — bandwidth grid search
//! POST /predict  — congestion prediction
//! GET  /metrics  — Prometheus request counters

pub mod analyze;
pub mod error;
pub mod index;
pub mod metrics;
pub mod optimize;
pub mod predict;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use netopt_core::{
    Codec, NetworkConditions, NetworkConditionsInput, Resolution, StreamProfile, StreamQuality,
};

use crate::state::AppState;

pub use error::ApiError;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::root))
        .route("/health", get(index::health))
        .route("/analyze", post(analyze::handler))
        .route("/optimize", post(optimize::handler))
        .route("/predict", post(predict::handler))
        .route("/metrics", get(metrics::handler))
}

// ── Shared request/response pieces ──────────────────────────────────

/// Turn a JSON body into validated conditions, counting and logging rejections.
pub(crate) fn validate_body(
    state: &AppState,
    route: &'static str,
    payload: Result<Json<NetworkConditionsInput>, JsonRejection>,
) -> Result<NetworkConditions, ApiError> {
    let result = match payload {
        Ok(Json(input)) => input
            .validate()
            .map_err(|e| ApiError::unprocessable(e.to_string())),
        Err(rejection) => Err(ApiError::unprocessable(rejection.body_text())),
    };

    if let Err(ref err) = result {
        state.metrics().record_rejected();
        tracing::warn!(route, error = %err.message(), "rejected network conditions");
    }
    result
}

/// Video recommendation block as rendered to clients.
#[derive(Debug, Serialize)]
pub struct VideoStreaming {
    pub resolution: Resolution,
    pub fps: u32,
    pub bitrate: String,
    pub codec: Codec,
    pub streaming_quality: StreamQuality,
}

impl From<&StreamProfile> for VideoStreaming {
    fn from(p: &StreamProfile) -> Self {
        Self {
            resolution: p.resolution,
            fps: p.fps,
            bitrate: format!("{:.1} Mbps", p.bitrate_mbps),
            codec: p.codec,
            streaming_quality: p.quality,
        }
    }
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.1}%")
}
