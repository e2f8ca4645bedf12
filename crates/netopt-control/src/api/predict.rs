//! POST /predict — congestion prediction for the link as measured.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use netopt_core::{assess, CongestionLevel, NetworkConditionsInput, PerformanceRating};

use super::{percent, validate_body, ApiError};
use crate::metrics::Endpoint;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub timestamp: DateTime<Utc>,
    pub network_score: f64,
    pub congestion_level: CongestionLevel,
    /// `100 − score`, as a percentage.
    pub predicted_congestion: String,
    pub performance_rating: PerformanceRating,
    pub status: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<NetworkConditionsInput>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let conditions = validate_body(&state, "predict", payload)?;
    let assessment = assess(&conditions);

    state.metrics().record(Endpoint::Predict);
    tracing::debug!(score = assessment.score, "congestion predicted");

    Ok(Json(PredictResponse {
        timestamp: Utc::now(),
        network_score: assessment.score,
        congestion_level: assessment.congestion_level,
        predicted_congestion: percent(100.0 - assessment.score),
        performance_rating: assessment.performance_rating,
        status: "success",
    }))
}
