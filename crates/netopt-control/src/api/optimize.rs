//! POST /optimize — bandwidth grid search.
//!
//! Returns every evaluated candidate plus the best one and how it compares
//! to the link as measured.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use netopt_core::{
    CongestionLevel, NetworkConditionsInput, OptimizationStep, OptimizeError, Recommendation,
};

use super::{percent, validate_body, ApiError, VideoStreaming};
use crate::metrics::Endpoint;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub timestamp: DateTime<Utc>,
    pub current_conditions: CurrentConditions,
    pub optimal_configuration: OptimalConfiguration,
    pub step_by_step_optimization: Vec<StepSummary>,
    pub recommendations: Vec<Recommendation>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentConditions {
    #[serde(flatten)]
    pub measured: NetworkConditionsInput,
    pub current_congestion: String,
    pub current_score: f64,
}

#[derive(Debug, Serialize)]
pub struct OptimalConfiguration {
    pub bandwidth: f64,
    pub predicted_score: f64,
    pub predicted_congestion: CongestionLevel,
    pub congestion_reduction: String,
    pub video_quality: VideoStreaming,
    pub performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Serialize)]
pub struct PerformanceMetrics {
    pub bandwidth_improvement: String,
    pub quality_improvement: String,
    pub network_efficiency: String,
}

#[derive(Debug, Serialize)]
pub struct StepSummary {
    pub bandwidth: f64,
    pub predicted_score: f64,
    pub congestion_level: CongestionLevel,
    pub video_quality: VideoStreaming,
}

impl From<&OptimizationStep> for StepSummary {
    fn from(step: &OptimizationStep) -> Self {
        Self {
            bandwidth: step.bandwidth,
            predicted_score: step.predicted_score,
            congestion_level: step.congestion_level,
            video_quality: VideoStreaming::from(&step.stream_profile),
        }
    }
}

/// Out-of-domain candidates are the caller's input; anything else is ours.
fn search_error(state: &AppState, err: OptimizeError) -> ApiError {
    match err {
        OptimizeError::Candidate(_) => {
            state.metrics().record_rejected();
            tracing::warn!(error = %err, "bandwidth grid left the valid domain");
            ApiError::unprocessable(err.to_string())
        }
        OptimizeError::InvalidGrid(_) | OptimizeError::NoCandidates => {
            tracing::error!(error = %err, "bandwidth grid search failed");
            ApiError::internal(err.to_string())
        }
    }
}

pub async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<NetworkConditionsInput>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let conditions = validate_body(&state, "optimize", payload)?;

    let result = state
        .search()
        .run(&conditions)
        .map_err(|e| search_error(&state, e))?;

    state.metrics().record(Endpoint::Optimize);
    tracing::info!(
        current_bandwidth = result.current_bandwidth,
        optimal_bandwidth = result.optimal.bandwidth,
        current_score = result.current.score,
        optimal_score = result.optimal.predicted_score,
        "network optimized"
    );

    let optimal = &result.optimal;
    Ok(Json(OptimizeResponse {
        timestamp: Utc::now(),
        current_conditions: CurrentConditions {
            measured: conditions.into(),
            current_congestion: percent(result.current_congestion()),
            current_score: result.current.score,
        },
        optimal_configuration: OptimalConfiguration {
            bandwidth: optimal.bandwidth,
            predicted_score: optimal.predicted_score,
            predicted_congestion: optimal.congestion_level,
            congestion_reduction: percent(result.congestion_reduction),
            video_quality: VideoStreaming::from(&optimal.stream_profile),
            performance_metrics: PerformanceMetrics {
                bandwidth_improvement: percent(result.bandwidth_improvement),
                quality_improvement: percent(result.quality_improvement),
                network_efficiency: format!("{:.1} score/Mbps", result.network_efficiency),
            },
        },
        step_by_step_optimization: result.steps.iter().map(StepSummary::from).collect(),
        recommendations: result.current.recommendations.clone(),
        status: "success",
    }))
}
