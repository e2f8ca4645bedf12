//! Stream profile tiers — maps a health score and bandwidth to a video
//! delivery configuration.
//!
//! The tier table is independent of the scorer's bands even where the
//! thresholds coincide.

use serde::{Serialize, Serializer};

use crate::conditions::NetworkConditions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Uhd2160,
    Fhd1080,
    Hd720,
    Sd480,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Uhd2160 => "4K (2160p)",
            Resolution::Fhd1080 => "1080p",
            Resolution::Hd720 => "720p",
            Resolution::Sd480 => "480p",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Hevc,
    Avc,
}

impl Codec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Hevc => "H.265/HEVC",
            Codec::Avc => "H.264/AVC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamQuality {
    UltraHigh,
    High,
    Medium,
    Low,
}

impl StreamQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamQuality::UltraHigh => "Ultra High",
            StreamQuality::High => "High",
            StreamQuality::Medium => "Medium",
            StreamQuality::Low => "Low",
        }
    }
}

/// Display and the wire format share one label per variant.
macro_rules! labelled {
    ($($ty:ty),*) => {$(
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    )*};
}

labelled!(Resolution, Codec, StreamQuality);

/// Recommended video configuration for a link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamProfile {
    pub resolution: Resolution,
    pub fps: u32,
    /// Target bitrate in Mbps, already capped for the tier.
    pub bitrate_mbps: f64,
    pub codec: Codec,
    pub quality: StreamQuality,
}

struct ProfileTier {
    min_score: f64,
    resolution: Resolution,
    fps: u32,
    bandwidth_fraction: f64,
    bitrate_cap_mbps: f64,
    codec: Codec,
    quality: StreamQuality,
}

/// Highest tier first; the last entry catches every remaining score.
static PROFILE_TIERS: [ProfileTier; 4] = [
    ProfileTier {
        min_score: 80.0,
        resolution: Resolution::Uhd2160,
        fps: 60,
        bandwidth_fraction: 0.8,
        bitrate_cap_mbps: 35.0,
        codec: Codec::Hevc,
        quality: StreamQuality::UltraHigh,
    },
    ProfileTier {
        min_score: 60.0,
        resolution: Resolution::Fhd1080,
        fps: 30,
        bandwidth_fraction: 0.7,
        bitrate_cap_mbps: 15.0,
        codec: Codec::Avc,
        quality: StreamQuality::High,
    },
    ProfileTier {
        min_score: 40.0,
        resolution: Resolution::Hd720,
        fps: 30,
        bandwidth_fraction: 0.6,
        bitrate_cap_mbps: 8.0,
        codec: Codec::Avc,
        quality: StreamQuality::Medium,
    },
    ProfileTier {
        min_score: f64::NEG_INFINITY,
        resolution: Resolution::Sd480,
        fps: 24,
        bandwidth_fraction: 0.5,
        bitrate_cap_mbps: 4.0,
        codec: Codec::Avc,
        quality: StreamQuality::Low,
    },
];

/// Pick the stream profile for `score`, sizing the bitrate from the link's bandwidth.
pub fn select_profile(conditions: &NetworkConditions, score: f64) -> StreamProfile {
    let tier = PROFILE_TIERS
        .iter()
        .find(|t| score >= t.min_score)
        .unwrap_or(&PROFILE_TIERS[PROFILE_TIERS.len() - 1]);

    StreamProfile {
        resolution: tier.resolution,
        fps: tier.fps,
        bitrate_mbps: (conditions.bandwidth() * tier.bandwidth_fraction)
            .min(tier.bitrate_cap_mbps),
        codec: tier.codec,
        quality: tier.quality,
    }
}
