//! Shared application state for nodegate.
//!
//! Built once at startup and cloned into every handler. Owns the single
//! admission cache instance; nothing here is a process global.

use std::sync::Arc;
use std::time::Duration;

use nodegate_core::error::Result;

use crate::cache::AdmissionCache;
use crate::config::NodeGateConfig;
use crate::fetcher::{FileFetcher, Fetcher};
use crate::obs::NodeGateMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: NodeGateConfig,
    cache: Arc<AdmissionCache>,
    metrics: Arc<NodeGateMetrics>,
}

impl AppState {
    /// Build state backed by the configured allow-list file.
    pub fn new(cfg: NodeGateConfig) -> Result<Self> {
        let fetcher = Arc::new(FileFetcher::new(&cfg.allowlist.path));
        Self::with_fetcher(cfg, fetcher)
    }

    /// Build state around an arbitrary allow-list source.
    pub fn with_fetcher(cfg: NodeGateConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(NodeGateMetrics::default());
        let interval = Duration::from_millis(cfg.allowlist.refresh_interval_ms);
        let cache = AdmissionCache::new(fetcher, interval).with_metrics(Arc::clone(&metrics));

        Ok(Self::from_parts(cfg, Arc::new(cache), metrics))
    }

    /// Assemble from a pre-built cache (custom clock, shared metrics).
    pub fn from_parts(
        cfg: NodeGateConfig,
        cache: Arc<AdmissionCache>,
        metrics: Arc<NodeGateMetrics>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, cache, metrics }),
        }
    }

    pub fn cfg(&self) -> &NodeGateConfig {
        &self.inner.cfg
    }

    pub fn cache(&self) -> Arc<AdmissionCache> {
        Arc::clone(&self.inner.cache)
    }

    pub fn metrics(&self) -> Arc<NodeGateMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Gauges computed at scrape time.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let status = self.inner.cache.status();
        vec![
            ("nodegate_snapshot_nodes", status.nodes as u64),
            ("nodegate_refresh_interval_ms", status.refresh_interval_ms),
        ]
    }
}
