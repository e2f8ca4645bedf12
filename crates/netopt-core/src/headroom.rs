//! Single-shot bandwidth suggestion.
//!
//! Links scoring under 60 are told to add 50 % bandwidth. This does not
//! consult the optimizer grid and the two can disagree.

use serde::Serialize;

use crate::conditions::NetworkConditions;

const HEADROOM_SCORE_THRESHOLD: f64 = 60.0;
const HEADROOM_FACTOR: f64 = 1.5;
const MAX_IMPROVEMENT_PCT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandwidthHeadroom {
    pub current_bandwidth: f64,
    pub recommended_bandwidth: f64,
    /// Percentage gain of recommended over current, capped at 100.
    pub potential_improvement_pct: f64,
}

pub fn suggest_bandwidth(conditions: &NetworkConditions, score: f64) -> BandwidthHeadroom {
    let current = conditions.bandwidth();
    let recommended = if score < HEADROOM_SCORE_THRESHOLD {
        current * HEADROOM_FACTOR
    } else {
        current
    };

    BandwidthHeadroom {
        current_bandwidth: current,
        recommended_bandwidth: recommended,
        // Never binds at the fixed 1.5× factor, which tops out at 50 %.
        potential_improvement_pct: ((recommended / current - 1.0) * 100.0)
            .min(MAX_IMPROVEMENT_PCT),
    }
}
