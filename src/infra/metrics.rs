//! Lock-free metrics collection and periodic reporting
//!
//! Uses atomics for hot-path operations to avoid mutex contention.
//! All counter updates are lock-free; reporting is the only operation
//! that needs synchronization (via atomic swap).
//!
//! NOTE: All atomics use Relaxed ordering on purpose; these are statistical
//! counters only. Do NOT use them for coordination or logic decisions.

use crate::domain::{Alert, AlertKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Update an atomic max value using compare-and-swap loop
#[inline]
fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Lock-free metrics collector
///
/// All recording operations are lock-free using atomics.
/// The `report()` method atomically swaps the windowed counters to get a
/// consistent snapshot of the interval since the last report.
pub struct Metrics {
    /// Snapshots successfully fetched and classified (monotonic)
    snapshots_total: AtomicU64,
    /// Fetch failures (monotonic)
    snapshot_failures_total: AtomicU64,
    /// Raw records seen across all snapshots (monotonic)
    records_total: AtomicU64,
    /// Alerts emitted, per kind (monotonic)
    alerts_fire_total: AtomicU64,
    alerts_no_signal_total: AtomicU64,
    alerts_exit_blocked_total: AtomicU64,
    /// Directory entries emitted (monotonic)
    residents_total: AtomicU64,
    /// Snapshots since last report (reset on report)
    snapshots_since_report: AtomicU64,
    /// Sum of classification latencies in microseconds (reset on report)
    classify_latency_sum_us: AtomicU64,
    /// Max classification latency in microseconds (reset on report)
    classify_latency_max_us: AtomicU64,
    started_at: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            snapshots_total: AtomicU64::new(0),
            snapshot_failures_total: AtomicU64::new(0),
            records_total: AtomicU64::new(0),
            alerts_fire_total: AtomicU64::new(0),
            alerts_no_signal_total: AtomicU64::new(0),
            alerts_exit_blocked_total: AtomicU64::new(0),
            residents_total: AtomicU64::new(0),
            snapshots_since_report: AtomicU64::new(0),
            classify_latency_sum_us: AtomicU64::new(0),
            classify_latency_max_us: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Record one classified snapshot
    pub fn record_classification(
        &self,
        record_count: u64,
        alerts: &[Alert],
        resident_count: u64,
        latency_us: u64,
    ) {
        self.snapshots_total.fetch_add(1, Ordering::Relaxed);
        self.snapshots_since_report.fetch_add(1, Ordering::Relaxed);
        self.records_total.fetch_add(record_count, Ordering::Relaxed);
        self.residents_total.fetch_add(resident_count, Ordering::Relaxed);

        for alert in alerts {
            let counter = match alert.kind {
                AlertKind::Fire => &self.alerts_fire_total,
                AlertKind::NoSignal => &self.alerts_no_signal_total,
                AlertKind::ExitBlocked => &self.alerts_exit_blocked_total,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }

        self.classify_latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        update_atomic_max(&self.classify_latency_max_us, latency_us);
    }

    /// Record a failed snapshot fetch
    pub fn record_fetch_failure(&self) {
        self.snapshot_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Produce a summary and reset the windowed counters
    pub fn report(&self) -> MetricsSummary {
        let window_snapshots = self.snapshots_since_report.swap(0, Ordering::Relaxed);
        let latency_sum_us = self.classify_latency_sum_us.swap(0, Ordering::Relaxed);
        let latency_max_us = self.classify_latency_max_us.swap(0, Ordering::Relaxed);

        let avg_classify_latency_us =
            if window_snapshots > 0 { latency_sum_us / window_snapshots } else { 0 };

        MetricsSummary {
            uptime_secs: self.started_at.elapsed().as_secs(),
            snapshots_total: self.snapshots_total.load(Ordering::Relaxed),
            snapshot_failures_total: self.snapshot_failures_total.load(Ordering::Relaxed),
            records_total: self.records_total.load(Ordering::Relaxed),
            alerts_fire_total: self.alerts_fire_total.load(Ordering::Relaxed),
            alerts_no_signal_total: self.alerts_no_signal_total.load(Ordering::Relaxed),
            alerts_exit_blocked_total: self.alerts_exit_blocked_total.load(Ordering::Relaxed),
            residents_total: self.residents_total.load(Ordering::Relaxed),
            window_snapshots,
            avg_classify_latency_us,
            max_classify_latency_us: latency_max_us,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time metrics snapshot produced by `report()`
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub uptime_secs: u64,
    pub snapshots_total: u64,
    pub snapshot_failures_total: u64,
    pub records_total: u64,
    pub alerts_fire_total: u64,
    pub alerts_no_signal_total: u64,
    pub alerts_exit_blocked_total: u64,
    pub residents_total: u64,
    pub window_snapshots: u64,
    pub avg_classify_latency_us: u64,
    pub max_classify_latency_us: u64,
}

impl MetricsSummary {
    /// Emit the summary as a single structured log line
    pub fn log(&self) {
        info!(
            uptime_secs = %self.uptime_secs,
            snapshots = %self.snapshots_total,
            fetch_failures = %self.snapshot_failures_total,
            records = %self.records_total,
            fire_alerts = %self.alerts_fire_total,
            no_signal_alerts = %self.alerts_no_signal_total,
            exit_blocked_alerts = %self.alerts_exit_blocked_total,
            residents = %self.residents_total,
            window_snapshots = %self.window_snapshots,
            avg_classify_us = %self.avg_classify_latency_us,
            max_classify_us = %self.max_classify_latency_us,
            "metrics_summary"
        );
    }
}
