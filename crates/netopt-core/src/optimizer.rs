//! # Bandwidth Grid Search
//!
//! Re-scores the link at a series of candidate bandwidths, holding every
//! other measurement fixed, and picks the candidate with the best score.
//!
//! The search is split into two swappable parts:
//! - [`CandidateGenerator`] — which bandwidths to try ([`LinearGrid`] by default)
//! - [`Objective`] — how each candidate is judged ([`HealthScore`] by default)
//!
//! Ties go to the first maximal candidate in generation order, so with the
//! default ascending grid the cheapest bandwidth reaching the best score wins.

use serde::Serialize;

use crate::conditions::{ConditionsError, NetworkConditions};
use crate::profile::{StreamProfile, select_profile};
use crate::scorer::{self, CongestionLevel, NetworkAssessment};

/// Number of grid points in the default search.
pub const DEFAULT_CANDIDATES: usize = 10;
/// Lower grid bound as a multiple of the current bandwidth.
pub const DEFAULT_MIN_FACTOR: f64 = 0.5;
/// Upper grid bound as a multiple of the current bandwidth.
pub const DEFAULT_MAX_FACTOR: f64 = 2.0;
/// Accepted range for either grid factor.
pub const FACTOR_RANGE: std::ops::RangeInclusive<f64> = 1e-3..=1e3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid search grid: {0}")]
    InvalidGrid(String),
    #[error("candidate generator produced no bandwidths")]
    NoCandidates,
    #[error("invalid candidate bandwidth: {0}")]
    Candidate(#[from] ConditionsError),
}

// ── Strategy traits ─────────────────────────────────────────────────

/// Produces the bandwidths (Mbps) to evaluate around the current one.
pub trait CandidateGenerator {
    fn candidates(&self, current_bandwidth: f64) -> Vec<f64>;
}

/// Judges one set of conditions. Higher `score` is better.
pub trait Objective {
    fn assess(&self, conditions: &NetworkConditions) -> NetworkAssessment;
}

/// The link health scorer as a search objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScore;

impl Objective for HealthScore {
    fn assess(&self, conditions: &NetworkConditions) -> NetworkAssessment {
        scorer::assess(conditions)
    }
}

/// Evenly spaced, endpoint-inclusive grid over
/// `[current * min_factor, current * max_factor]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGrid {
    points: usize,
    min_factor: f64,
    max_factor: f64,
}

impl Default for LinearGrid {
    fn default() -> Self {
        LinearGrid {
            points: DEFAULT_CANDIDATES,
            min_factor: DEFAULT_MIN_FACTOR,
            max_factor: DEFAULT_MAX_FACTOR,
        }
    }
}

impl LinearGrid {
    pub fn new(points: usize, min_factor: f64, max_factor: f64) -> Result<Self, OptimizeError> {
        if points < 2 {
            return Err(OptimizeError::InvalidGrid(format!(
                "need at least 2 points, got {points}"
            )));
        }
        if !FACTOR_RANGE.contains(&min_factor) || !FACTOR_RANGE.contains(&max_factor) {
            return Err(OptimizeError::InvalidGrid(format!(
                "factors must lie within {FACTOR_RANGE:?} (min={min_factor}, max={max_factor})"
            )));
        }
        if min_factor >= max_factor {
            return Err(OptimizeError::InvalidGrid(format!(
                "min_factor {min_factor} must be below max_factor {max_factor}"
            )));
        }
        Ok(LinearGrid {
            points,
            min_factor,
            max_factor,
        })
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn min_factor(&self) -> f64 {
        self.min_factor
    }

    pub fn max_factor(&self) -> f64 {
        self.max_factor
    }
}

impl CandidateGenerator for LinearGrid {
    fn candidates(&self, current_bandwidth: f64) -> Vec<f64> {
        let lo = current_bandwidth * self.min_factor;
        let hi = current_bandwidth * self.max_factor;
        let intervals = (self.points - 1) as f64;
        let step = (hi - lo) / intervals;

        let mut out: Vec<f64> = (0..self.points).map(|i| lo + i as f64 * step).collect();
        // Pin the upper endpoint so rounding in `i * step` cannot undershoot it.
        if let Some(last) = out.last_mut() {
            *last = hi;
        }
        out
    }
}

// ── Results ─────────────────────────────────────────────────────────

/// One evaluated grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationStep {
    pub bandwidth: f64,
    pub predicted_score: f64,
    pub congestion_level: CongestionLevel,
    pub stream_profile: StreamProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub current_bandwidth: f64,
    /// Assessment of the conditions as measured.
    pub current: NetworkAssessment,
    /// Every evaluated candidate, in generation order.
    pub steps: Vec<OptimizationStep>,
    /// Index into `steps` of the selected candidate.
    pub optimal_index: usize,
    pub optimal: OptimizationStep,
    /// Drop in congestion (100 − score) from current to optimal, in percentage points.
    pub congestion_reduction: f64,
    /// Bandwidth change from current to optimal, in percent.
    pub bandwidth_improvement: f64,
    /// Score gain from current to optimal.
    pub quality_improvement: f64,
    /// Optimal score per Mbps of optimal bandwidth.
    pub network_efficiency: f64,
}

impl OptimizationResult {
    /// Congestion of the measured link, `100 − score`.
    pub fn current_congestion(&self) -> f64 {
        100.0 - self.current.score
    }
}

// ── Search ──────────────────────────────────────────────────────────

/// A grid search over bandwidth candidates.
#[derive(Debug, Clone, Default)]
pub struct GridSearch<G = LinearGrid, O = HealthScore> {
    generator: G,
    objective: O,
}

impl<G: CandidateGenerator, O: Objective> GridSearch<G, O> {
    pub fn new(generator: G, objective: O) -> Self {
        GridSearch {
            generator,
            objective,
        }
    }

    pub fn run(&self, conditions: &NetworkConditions) -> Result<OptimizationResult, OptimizeError> {
        let current_bandwidth = conditions.bandwidth();
        let current = self.objective.assess(conditions);

        let steps = self
            .generator
            .candidates(current_bandwidth)
            .into_iter()
            .map(|bw| self.evaluate(conditions, bw))
            .collect::<Result<Vec<_>, _>>()?;

        let (optimal_index, optimal) = first_max(&steps).ok_or(OptimizeError::NoCandidates)?;
        let optimal = optimal.clone();

        let congestion_reduction = (100.0 - current.score) - (100.0 - optimal.predicted_score);
        let bandwidth_improvement = (optimal.bandwidth / current_bandwidth - 1.0) * 100.0;
        let quality_improvement = optimal.predicted_score - current.score;
        let network_efficiency = optimal.predicted_score / optimal.bandwidth;

        tracing::debug!(
            candidates = steps.len(),
            current_score = current.score,
            optimal_bandwidth = optimal.bandwidth,
            optimal_score = optimal.predicted_score,
            "bandwidth grid search complete"
        );

        Ok(OptimizationResult {
            current_bandwidth,
            current,
            steps,
            optimal_index,
            optimal,
            congestion_reduction,
            bandwidth_improvement,
            quality_improvement,
            network_efficiency,
        })
    }

    fn evaluate(
        &self,
        conditions: &NetworkConditions,
        bandwidth: f64,
    ) -> Result<OptimizationStep, OptimizeError> {
        let candidate = conditions.with_bandwidth(bandwidth)?;
        let assessment = self.objective.assess(&candidate);
        Ok(OptimizationStep {
            bandwidth,
            predicted_score: assessment.score,
            congestion_level: assessment.congestion_level,
            stream_profile: select_profile(&candidate, assessment.score),
        })
    }
}

/// First step holding the maximum score. Later equal scores never replace it.
fn first_max(steps: &[OptimizationStep]) -> Option<(usize, &OptimizationStep)> {
    let mut best: Option<(usize, &OptimizationStep)> = None;
    for (i, step) in steps.iter().enumerate() {
        match best {
            Some((_, b)) if step.predicted_score <= b.predicted_score => {}
            _ => best = Some((i, step)),
        }
    }
    best
}

/// Run the default search: 10 points over `[0.5×, 2.0×]` the current bandwidth.
pub fn optimize(conditions: &NetworkConditions) -> Result<OptimizationResult, OptimizeError> {
    GridSearch::<LinearGrid, HealthScore>::default().run(conditions)
}
