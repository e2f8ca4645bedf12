//! Measured link conditions and their validation.
//!
//! [`NetworkConditionsInput`] is the raw wire shape; [`NetworkConditions`]
//! can only be obtained through [`NetworkConditionsInput::validate`] (or the
//! equivalent constructors), so every value the scorer sees is in-domain.

use serde::{Deserialize, Serialize};

/// Smallest accepted measured bandwidth: 1 bit/s, in Mbps.
pub const MIN_BANDWIDTH: f64 = 1e-6;
/// Largest accepted measured bandwidth: 1 Pbit/s, in Mbps.
pub const MAX_BANDWIDTH: f64 = 1e9;

/// Raised when a measurement falls outside its declared domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionsError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl ConditionsError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ConditionsError::NotFinite { field } | ConditionsError::OutOfRange { field, .. } => {
                field
            }
        }
    }
}

/// Unvalidated measurements as received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkConditionsInput {
    /// Link bandwidth in Mbps.
    pub bandwidth: f64,
    /// Throughput ratio, 0.0–1.0.
    pub throughput: f64,
    /// Packet loss in percent, 0–100.
    pub packet_loss: f64,
    /// Latency in milliseconds.
    pub latency: f64,
    /// Jitter in milliseconds.
    pub jitter: f64,
}

impl NetworkConditionsInput {
    pub fn validate(self) -> Result<NetworkConditions, ConditionsError> {
        NetworkConditions::new(
            self.bandwidth,
            self.throughput,
            self.packet_loss,
            self.latency,
            self.jitter,
        )
    }
}

/// In-domain link measurements. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkConditionsInput")]
pub struct NetworkConditions {
    bandwidth: f64,
    throughput: f64,
    packet_loss: f64,
    latency: f64,
    jitter: f64,
}

impl NetworkConditions {
    pub fn new(
        bandwidth: f64,
        throughput: f64,
        packet_loss: f64,
        latency: f64,
        jitter: f64,
    ) -> Result<Self, ConditionsError> {
        Ok(NetworkConditions {
            bandwidth: check_bandwidth(bandwidth)?,
            throughput: check("throughput", throughput, "0 <= value <= 1", |v| {
                (0.0..=1.0).contains(&v)
            })?,
            packet_loss: check("packet_loss", packet_loss, "0 <= value <= 100", |v| {
                (0.0..=100.0).contains(&v)
            })?,
            latency: check("latency", latency, "value >= 0", |v| v >= 0.0)?,
            jitter: check("jitter", jitter, "value >= 0", |v| v >= 0.0)?,
        })
    }

    /// Copy of these conditions with only the bandwidth replaced.
    ///
    /// Candidate bandwidths may leave the measured range but must stay
    /// finite and positive.
    pub fn with_bandwidth(&self, bandwidth: f64) -> Result<Self, ConditionsError> {
        Ok(NetworkConditions {
            bandwidth: check("bandwidth", bandwidth, "value > 0", |v| v > 0.0)?,
            ..*self
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn throughput(&self) -> f64 {
        self.throughput
    }

    pub fn packet_loss(&self) -> f64 {
        self.packet_loss
    }

    pub fn latency(&self) -> f64 {
        self.latency
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}

impl TryFrom<NetworkConditionsInput> for NetworkConditions {
    type Error = ConditionsError;

    fn try_from(input: NetworkConditionsInput) -> Result<Self, Self::Error> {
        input.validate()
    }
}

impl From<NetworkConditions> for NetworkConditionsInput {
    fn from(c: NetworkConditions) -> Self {
        NetworkConditionsInput {
            bandwidth: c.bandwidth,
            throughput: c.throughput,
            packet_loss: c.packet_loss,
            latency: c.latency,
            jitter: c.jitter,
        }
    }
}

fn check_bandwidth(value: f64) -> Result<f64, ConditionsError> {
    check(
        "bandwidth",
        value,
        "1e-6 <= value <= 1e9",
        |v| (MIN_BANDWIDTH..=MAX_BANDWIDTH).contains(&v),
    )
}

fn check(
    field: &'static str,
    value: f64,
    expected: &'static str,
    in_domain: impl Fn(f64) -> bool,
) -> Result<f64, ConditionsError> {
    if !value.is_finite() {
        return Err(ConditionsError::NotFinite { field });
    }
    if !in_domain(value) {
        return Err(ConditionsError::OutOfRange {
            field,
            value,
            expected,
        });
    }
    Ok(value)
}
