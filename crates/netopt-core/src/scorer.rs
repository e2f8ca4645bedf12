//! # Link Health Scoring
//!
//! Composite health score (0–100) from the five measured link conditions.
//!
//! $$\text{Score} = \text{clamp}_{[0,100]}\left(100 - 2\,\text{loss} - 0.5\,\text{latency} - 5\,\text{jitter} + 20\,\text{throughput} + \min(5\,\text{bw}, 30)\right)$$
//!
//! The score is banded twice, into a [`CongestionLevel`] and a
//! [`PerformanceRating`]. The two ladders use different thresholds and are
//! kept as separate tables.

use serde::{Serialize, Serializer};

use crate::conditions::NetworkConditions;

const BASE_SCORE: f64 = 100.0;
const LOSS_PENALTY: f64 = 2.0;
const LATENCY_PENALTY: f64 = 0.5;
const JITTER_PENALTY: f64 = 5.0;
const THROUGHPUT_BONUS: f64 = 20.0;
const BANDWIDTH_BONUS: f64 = 5.0;
const BANDWIDTH_BONUS_CAP: f64 = 30.0;

// ── Bands ───────────────────────────────────────────────────────────

/// How constrained the link currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CongestionLevel {
    Severe,
    High,
    Moderate,
    Low,
}

/// Congestion ladder, highest threshold first. Below the last entry: Severe.
const CONGESTION_LADDER: [(f64, CongestionLevel); 3] = [
    (80.0, CongestionLevel::Low),
    (60.0, CongestionLevel::Moderate),
    (40.0, CongestionLevel::High),
];

impl CongestionLevel {
    pub fn from_score(score: f64) -> Self {
        CONGESTION_LADDER
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, level)| *level)
            .unwrap_or(CongestionLevel::Severe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CongestionLevel::Low => "Low",
            CongestionLevel::Moderate => "Moderate",
            CongestionLevel::High => "High",
            CongestionLevel::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall link quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PerformanceRating {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Performance ladder, highest threshold first. Below the last entry: Critical.
const PERFORMANCE_LADDER: [(f64, PerformanceRating); 4] = [
    (90.0, PerformanceRating::Excellent),
    (75.0, PerformanceRating::Good),
    (60.0, PerformanceRating::Fair),
    (40.0, PerformanceRating::Poor),
];

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        PERFORMANCE_LADDER
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, rating)| *rating)
            .unwrap_or(PerformanceRating::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::Good => "Good",
            PerformanceRating::Fair => "Fair",
            PerformanceRating::Poor => "Poor",
            PerformanceRating::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Recommendations ─────────────────────────────────────────────────

/// Remedial advice triggered by a single raw measurement.
///
/// Variant order is the order recommendations are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Recommendation {
    /// packet_loss > 5 %
    CheckHardware,
    /// latency > 100 ms
    CloserServer,
    /// jitter > 30 ms
    AdjustQos,
    /// throughput < 0.3
    UpgradeBandwidth,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::CheckHardware => {
                "High packet loss detected. Consider checking network hardware or ISP service."
            }
            Recommendation::CloserServer => {
                "High latency detected. Consider using a closer server or check network routing."
            }
            Recommendation::AdjustQos => {
                "High jitter detected. QoS settings adjustment recommended."
            }
            Recommendation::UpgradeBandwidth => {
                "Low throughput detected. Bandwidth upgrade or traffic optimization recommended."
            }
        }
    }

    /// All recommendations whose gate fires for `conditions`, in priority order.
    pub fn for_conditions(conditions: &NetworkConditions) -> Vec<Recommendation> {
        let gates = [
            (conditions.packet_loss() > 5.0, Recommendation::CheckHardware),
            (conditions.latency() > 100.0, Recommendation::CloserServer),
            (conditions.jitter() > 30.0, Recommendation::AdjustQos),
            (conditions.throughput() < 0.3, Recommendation::UpgradeBandwidth),
        ];
        gates
            .into_iter()
            .filter_map(|(fired, rec)| fired.then_some(rec))
            .collect()
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

// ── Assessment ──────────────────────────────────────────────────────

/// Scored and banded view of one set of link conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAssessment {
    /// Health score, 0–100. Higher = healthier.
    pub score: f64,
    pub congestion_level: CongestionLevel,
    pub performance_rating: PerformanceRating,
    pub recommendations: Vec<Recommendation>,
}

/// Unclamped score. Useful for diagnostics; may fall outside 0–100.
pub fn raw_score(conditions: &NetworkConditions) -> f64 {
    let mut raw = BASE_SCORE;
    raw -= conditions.packet_loss() * LOSS_PENALTY;
    raw -= conditions.latency() * LATENCY_PENALTY;
    raw -= conditions.jitter() * JITTER_PENALTY;
    raw += conditions.throughput() * THROUGHPUT_BONUS;
    raw += (conditions.bandwidth() * BANDWIDTH_BONUS).min(BANDWIDTH_BONUS_CAP);
    raw
}

/// Score, band and advise on a set of link conditions.
pub fn assess(conditions: &NetworkConditions) -> NetworkAssessment {
    let score = raw_score(conditions).clamp(0.0, 100.0);
    NetworkAssessment {
        score,
        congestion_level: CongestionLevel::from_score(score),
        performance_rating: PerformanceRating::from_score(score),
        recommendations: Recommendation::for_conditions(conditions),
    }
}
