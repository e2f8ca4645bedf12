//! Service configuration.
//!
//! Loaded from an optional TOML file; every key has a default so an empty or
//! missing file yields a working service.
//!
//! ```toml
//! version = 1
//!
//! [server]
//! listen_addr = "0.0.0.0:8000"
//! cors_permissive = true
//!
//! [optimizer]
//! candidates = 10
//! min_factor = 0.5
//! max_factor = 2.0
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use netopt_core::optimizer::{
    LinearGrid, OptimizeError, DEFAULT_CANDIDATES, DEFAULT_MAX_FACTOR, DEFAULT_MIN_FACTOR,
};

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported config version {0}")]
    Version(u32),
    #[error("invalid listen_addr {0:?}")]
    ListenAddr(String),
    #[error(transparent)]
    Optimizer(#[from] OptimizeError),
}

// ── Raw input ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfigInput {
    pub version: u32,
    pub server: ServerConfigInput,
    pub optimizer: OptimizerConfigInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfigInput {
    pub listen_addr: Option<String>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptimizerConfigInput {
    pub candidates: Option<usize>,
    pub min_factor: Option<f64>,
    pub max_factor: Option<f64>,
}

// ── Resolved ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_permissive: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub version: u32,
    pub server: ServerConfig,
    pub grid: LinearGrid,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            grid: LinearGrid::default(),
        }
    }
}

impl ServiceConfigInput {
    pub fn resolve(self) -> Result<ServiceConfig, ConfigError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(ConfigError::Version(version));
        }

        let defaults = ServerConfig::default();
        let listen_addr = match self.server.listen_addr {
            Some(addr) => parse_listen_addr(&addr)?,
            None => defaults.listen_addr,
        };

        let grid = LinearGrid::new(
            self.optimizer.candidates.unwrap_or(DEFAULT_CANDIDATES),
            self.optimizer.min_factor.unwrap_or(DEFAULT_MIN_FACTOR),
            self.optimizer.max_factor.unwrap_or(DEFAULT_MAX_FACTOR),
        )?;

        Ok(ServiceConfig {
            version,
            server: ServerConfig {
                listen_addr,
                cors_permissive: self
                    .server
                    .cors_permissive
                    .unwrap_or(defaults.cors_permissive),
            },
            grid,
        })
    }
}

impl ServiceConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(ServiceConfig::default());
        }
        let parsed: ServiceConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(ServiceConfig::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.trim()
        .parse()
        .map_err(|_| ConfigError::ListenAddr(addr.to_string()))
}
