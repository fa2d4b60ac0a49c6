use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;

use nodegate_core::{NodeIdentity, Snapshot};

use super::clock::{Clock, MonotonicClock};
use crate::fetcher::Fetcher;
use crate::obs::NodeGateMetrics;

/// Marker for "no refresh attempted yet".
const NEVER: u64 = u64::MAX;

/// Default minimum time between refresh attempts.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Lifecycle of the cached allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// No successful fetch yet; everyone is denied.
    Empty,
    /// Within one interval of the last attempt.
    Fresh,
    /// Interval elapsed; the next request refreshes.
    Stale,
}

/// Point-in-time view of the cache for ops endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub state: CacheState,
    pub nodes: usize,
    pub refresh_interval_ms: u64,
    pub last_attempt_ms_ago: Option<u64>,
    pub last_success_ms_ago: Option<u64>,
    pub refresh_ok: u64,
    pub refresh_failed: u64,
}

/// Currently published snapshot, the claim stamp of the refresh that built
/// it, and when it was published.
struct Published {
    snapshot: Arc<Snapshot>,
    claimed_at: Option<u64>,
    published_at: Option<u64>,
}

/// State shared between callers and in-flight refresh tasks.
struct Shared {
    current: RwLock<Published>,
    last_attempt: AtomicU64,
    refresh_ok: AtomicU64,
    refresh_failed: AtomicU64,
}

/// Lazily refreshed allow-list.
///
/// Every `is_admitted` call checks whether the refresh interval has elapsed
/// since the last attempt. If so, exactly one caller claims the slot with a
/// CAS on `last_attempt` and runs the fetch; everyone else answers from the
/// snapshot that is current at read time. No lock is held while fetching.
///
/// The fetch and publish run on a spawned task, so a claimed refresh always
/// completes even if the caller that claimed it is dropped.
pub struct AdmissionCache {
    fetcher: Arc<dyn Fetcher>,
    clock: Arc<dyn Clock>,
    metrics: Arc<NodeGateMetrics>,
    interval_ms: u64,
    shared: Arc<Shared>,
}

impl AdmissionCache {
    pub fn new(fetcher: Arc<dyn Fetcher>, refresh_interval: Duration) -> Self {
        Self {
            fetcher,
            clock: Arc::new(MonotonicClock::new()),
            metrics: Arc::new(NodeGateMetrics::default()),
            // Zero would let two callers claim the same instant.
            interval_ms: (refresh_interval.as_millis() as u64).max(1),
            shared: Arc::new(Shared {
                current: RwLock::new(Published {
                    snapshot: Arc::new(Snapshot::empty()),
                    claimed_at: None,
                    published_at: None,
                }),
                last_attempt: AtomicU64::new(NEVER),
                refresh_ok: AtomicU64::new(0),
                refresh_failed: AtomicU64::new(0),
            }),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<NodeGateMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Admission decision for `id`. Never fails: fetch errors fall back to
    /// the last published snapshot (empty until the first success).
    pub async fn is_admitted(&self, id: &NodeIdentity) -> bool {
        self.refresh_if_stale().await;
        self.snapshot().contains(id)
    }

    /// Run a refresh if the interval has elapsed and this caller wins the
    /// claim. Returns whether this caller fetched.
    pub async fn refresh_if_stale(&self) -> bool {
        let now = self.clock.now_millis();
        let Some(claimed_at) = self.try_claim(now) else {
            return false;
        };

        let task = RefreshTask {
            fetcher: Arc::clone(&self.fetcher),
            clock: Arc::clone(&self.clock),
            metrics: Arc::clone(&self.metrics),
            shared: Arc::clone(&self.shared),
        };
        if let Err(e) = tokio::spawn(task.run(claimed_at)).await {
            tracing::error!(error = %e, "allow-list refresh task aborted");
        }
        true
    }

    /// Snapshot current at the time of the call.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let slot = self.shared.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slot.snapshot)
    }

    pub fn status(&self) -> CacheStatus {
        let now = self.clock.now_millis();
        let (nodes, loaded, published_at) = {
            let slot = self.shared.current.read().unwrap_or_else(PoisonError::into_inner);
            (slot.snapshot.len(), slot.claimed_at.is_some(), slot.published_at)
        };
        let last_attempt = self.shared.last_attempt.load(Ordering::Acquire);

        let state = if !loaded {
            CacheState::Empty
        } else if self.is_due(last_attempt, now) {
            CacheState::Stale
        } else {
            CacheState::Fresh
        };

        CacheStatus {
            state,
            nodes,
            refresh_interval_ms: self.interval_ms,
            last_attempt_ms_ago: ago(last_attempt, now),
            last_success_ms_ago: published_at.map(|at| now.saturating_sub(at)),
            refresh_ok: self.shared.refresh_ok.load(Ordering::Relaxed),
            refresh_failed: self.shared.refresh_failed.load(Ordering::Relaxed),
        }
    }

    fn is_due(&self, last_attempt: u64, now: u64) -> bool {
        last_attempt == NEVER || now.saturating_sub(last_attempt) >= self.interval_ms
    }

    /// Claim the refresh slot. The marker moves before the fetch starts, so
    /// callers arriving during a slow fetch see a fresh marker and skip.
    fn try_claim(&self, now: u64) -> Option<u64> {
        let prev = self.shared.last_attempt.load(Ordering::Acquire);
        if !self.is_due(prev, now) {
            return None;
        }
        self.shared
            .last_attempt
            .compare_exchange(prev, now, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| now)
    }
}

/// One claimed fetch-and-publish, owned by its own task.
struct RefreshTask {
    fetcher: Arc<dyn Fetcher>,
    clock: Arc<dyn Clock>,
    metrics: Arc<NodeGateMetrics>,
    shared: Arc<Shared>,
}

impl RefreshTask {
    async fn run(self, claimed_at: u64) {
        let source = self.fetcher.describe();
        tracing::info!(%source, "fetching allow-list");

        let started = Instant::now();
        let res = self.fetcher.fetch().await;
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;
        self.metrics.fetch_duration.observe(&[], elapsed);

        match res {
            Ok(snapshot) => {
                let nodes = snapshot.len();
                if self.publish(snapshot, claimed_at) {
                    self.shared.refresh_ok.fetch_add(1, Ordering::Relaxed);
                    self.metrics.refreshes.inc(&[("outcome", "ok")]);
                    tracing::info!(%source, nodes, elapsed_ms, "allow-list updated");
                } else {
                    self.metrics.refreshes.inc(&[("outcome", "superseded")]);
                    tracing::debug!(%source, claimed_at, "newer snapshot already published; dropping result");
                }
            }
            Err(e) => {
                self.shared.refresh_failed.fetch_add(1, Ordering::Relaxed);
                self.metrics.refreshes.inc(&[("outcome", "failed")]);
                tracing::warn!(
                    %source,
                    elapsed_ms,
                    code = e.client_code().as_str(),
                    error = %e,
                    "allow-list refresh failed; keeping previous snapshot"
                );
            }
        }
    }

    /// Swap in a new snapshot unless a later claim already published.
    fn publish(&self, snapshot: Snapshot, claimed_at: u64) -> bool {
        let snapshot = Arc::new(snapshot);
        let mut slot = self.shared.current.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(slot.claimed_at, Some(prev) if prev > claimed_at) {
            return false;
        }
        *slot = Published {
            snapshot,
            claimed_at: Some(claimed_at),
            published_at: Some(self.clock.now_millis()),
        };
        true
    }
}

fn ago(stamp: u64, now: u64) -> Option<u64> {
    (stamp != NEVER).then(|| now.saturating_sub(stamp))
}
