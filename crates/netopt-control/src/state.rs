//! Shared application state.

use std::sync::Arc;

use netopt_core::optimizer::{GridSearch, HealthScore, LinearGrid};

use crate::config::ServiceConfig;
use crate::metrics::RequestMetrics;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: ServiceConfig,
    /// Grid search built once from the `[optimizer]` config section.
    search: GridSearch<LinearGrid, HealthScore>,
    metrics: RequestMetrics,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let search = GridSearch::new(config.grid, HealthScore);
        Self {
            inner: Arc::new(Inner {
                config,
                search,
                metrics: RequestMetrics::default(),
            }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    pub fn search(&self) -> &GridSearch<LinearGrid, HealthScore> {
        &self.inner.search
    }

    pub fn metrics(&self) -> &RequestMetrics {
        &self.inner.metrics
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
