//! Minimal metrics registry for nodegate.
//!
//! Counters and histograms with dynamic labels backed by `DashMap`. Labels are
//! flattened into sorted key vectors to keep deterministic ordering. Histogram
//! buckets are fixed in microseconds to avoid floating point math.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

// 100us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 30s
// Fetches hit disk or network, so the tail is wider than a request path needs.
const BUCKETS_MICROS: [u64; 10] = [
    100, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 30_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

#[derive(Default)]
pub struct NodeGateMetrics {
    /// Admission decisions by `result` (allow/deny).
    pub decisions: CounterVec,
    /// Refresh attempts by `outcome` (ok/failed/superseded).
    pub refreshes: CounterVec,
    /// Rejected requests by client `code`.
    pub request_errors: CounterVec,
    pub fetch_duration: HistogramVec, // In Microseconds
    draining: AtomicBool,
}

impl NodeGateMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all registered metrics plus any extra gauges provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.decisions.render("nodegate_decisions_total", &mut out);
        self.refreshes.render("nodegate_refreshes_total", &mut out);
        self.request_errors.render("nodegate_request_errors_total", &mut out);
        self.fetch_duration.render("nodegate_fetch_duration_micros", &mut out);

        let _ = writeln!(
            out,
            "# TYPE nodegate_draining gauge\nnodegate_draining {}",
            if self.is_draining() { 1 } else { 0 }
        );
        for (k, v) in extra {
            let _ = writeln!(out, "# TYPE {} gauge\n{} {}", k, k, v);
        }
        out
    }
}
