//! Request counters and their Prometheus text rendering.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Endpoints that are counted individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Optimize,
    Predict,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Analyze => "analyze",
            Endpoint::Optimize => "optimize",
            Endpoint::Predict => "predict",
        }
    }
}

/// Monotonic request counters, shared across handlers.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    analyze: AtomicU64,
    optimize: AtomicU64,
    predict: AtomicU64,
    rejected: AtomicU64,
}

/// Point-in-time copy of [`RequestMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub analyze: u64,
    pub optimize: u64,
    pub predict: u64,
    pub rejected: u64,
}

impl RequestMetrics {
    pub fn record(&self, endpoint: Endpoint) {
        let counter = match endpoint {
            Endpoint::Analyze => &self.analyze,
            Endpoint::Optimize => &self.optimize,
            Endpoint::Predict => &self.predict,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            analyze: self.analyze.load(Ordering::Relaxed),
            optimize: self.optimize.load(Ordering::Relaxed),
            predict: self.predict.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Render a snapshot as Prometheus text exposition format.
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::with_capacity(512);

    writeln!(
        out,
        "# HELP netopt_requests_total Successfully served requests by endpoint."
    )
    .unwrap();
    writeln!(out, "# TYPE netopt_requests_total counter").unwrap();
    for (endpoint, count) in [
        (Endpoint::Analyze, snapshot.analyze),
        (Endpoint::Optimize, snapshot.optimize),
        (Endpoint::Predict, snapshot.predict),
    ] {
        writeln!(
            out,
            "netopt_requests_total{{endpoint=\"{}\"}} {count}",
            endpoint.as_str()
        )
        .unwrap();
    }

    writeln!(
        out,
        "# HELP netopt_requests_rejected_total Requests rejected for malformed or out-of-range input."
    )
    .unwrap();
    writeln!(out, "# TYPE netopt_requests_rejected_total counter").unwrap();
    writeln!(out, "netopt_requests_rejected_total {}", snapshot.rejected).unwrap();

    out
}
