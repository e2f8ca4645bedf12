//! Link health scoring and bandwidth optimisation.
//!
//! This crate contains:
//! - **Conditions** — validated link measurements (bandwidth, throughput, loss, latency, jitter)
//! - **Scorer** — composite health score with congestion and performance bands
//! - **Stream profiles** — video delivery tier for a given score and bandwidth
//! - **Optimizer** — grid search over candidate bandwidths
//! - **Headroom** — single-shot 1.5× bandwidth suggestion for weak links
//!
//! Everything here is pure and synchronous; callers own transport and
//! serialization format.

pub mod conditions;
pub mod headroom;
pub mod optimizer;
pub mod profile;
pub mod scorer;

pub use conditions::{
    ConditionsError, MAX_BANDWIDTH, MIN_BANDWIDTH, NetworkConditions, NetworkConditionsInput,
};
pub use headroom::{BandwidthHeadroom, suggest_bandwidth};
pub use optimizer::{
    CandidateGenerator, GridSearch, HealthScore, LinearGrid, Objective, OptimizationResult,
    OptimizationStep, OptimizeError, optimize,
};
pub use profile::{Codec, Resolution, StreamProfile, StreamQuality, select_profile};
pub use scorer::{CongestionLevel, NetworkAssessment, PerformanceRating, Recommendation, assess};
