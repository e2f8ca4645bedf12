//! POST /analyze — comprehensive analysis of one set of link measurements.
//!
//! Runs the scorer, picks a stream profile for the resulting score and adds
//! the single-shot bandwidth headroom suggestion.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use netopt_core::{
    assess, select_profile, suggest_bandwidth, CongestionLevel, NetworkConditions,
    NetworkConditionsInput, PerformanceRating, Recommendation,
};

use super::{percent, validate_body, ApiError, VideoStreaming};
use crate::metrics::Endpoint;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub timestamp: DateTime<Utc>,
    pub input_conditions: NetworkConditions,
    pub analysis_results: AnalysisResults,
    pub optimization: BandwidthSuggestion,
    pub video_streaming: VideoStreaming,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResults {
    pub network_score: f64,
    pub congestion_level: CongestionLevel,
    pub performance_rating: PerformanceRating,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct BandwidthSuggestion {
    pub current_bandwidth: f64,
    pub recommended_bandwidth: f64,
    pub potential_improvement: String,
}

pub async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<NetworkConditionsInput>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let conditions = validate_body(&state, "analyze", payload)?;

    let assessment = assess(&conditions);
    let profile = select_profile(&conditions, assessment.score);
    let headroom = suggest_bandwidth(&conditions, assessment.score);

    state.metrics().record(Endpoint::Analyze);
    tracing::info!(
        score = assessment.score,
        congestion = %assessment.congestion_level,
        rating = %assessment.performance_rating,
        "network analyzed"
    );

    Ok(Json(AnalyzeResponse {
        timestamp: Utc::now(),
        input_conditions: conditions,
        analysis_results: AnalysisResults {
            network_score: assessment.score,
            congestion_level: assessment.congestion_level,
            performance_rating: assessment.performance_rating,
            recommendations: assessment.recommendations,
        },
        optimization: BandwidthSuggestion {
            current_bandwidth: headroom.current_bandwidth,
            recommended_bandwidth: headroom.recommended_bandwidth,
            potential_improvement: percent(headroom.potential_improvement_pct),
        },
        video_streaming: VideoStreaming::from(&profile),
        status: "success",
    }))
}
