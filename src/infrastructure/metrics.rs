//! Metrics collection for simulation runs
//!
//! Atomic counters updated per price update.
//! Snapshots are serializable for the end-of-run summary.

use crate::hot_path::Propagation;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Run metrics collector
pub struct MetricsCollector {
    /// Price updates consumed
    updates: AtomicU64,
    /// Portfolio valuations emitted
    valuations: AtomicU64,
    /// Updates for names held by no portfolio
    unlisted_updates: AtomicU64,
    /// Walks stopped at an under-priced portfolio
    pending_stops: AtomicU64,
    /// Walks that valued every ancestor up to a root
    root_completions: AtomicU64,
    /// Batches read from the price source
    chunks: AtomicU64,
    /// Start time for elapsed/rate calculation
    start_time: Instant,
}

/// Metrics snapshot for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub updates: u64,
    pub valuations: u64,
    pub unlisted_updates: u64,
    pub pending_stops: u64,
    pub root_completions: u64,
    pub chunks: u64,
    pub elapsed_ms: u64,
    pub update_rate: f64, // updates per second
}

impl MetricsCollector {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            updates: AtomicU64::new(0),
            valuations: AtomicU64::new(0),
            unlisted_updates: AtomicU64::new(0),
            pending_stops: AtomicU64::new(0),
            root_completions: AtomicU64::new(0),
            chunks: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn record_chunk(&self) {
        self.chunks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one applied update and where its walk stopped
    #[inline]
    pub fn record_update(&self, outcome: Propagation, emitted: usize) {
        self.updates.fetch_add(1, Ordering::Relaxed);
        self.valuations.fetch_add(emitted as u64, Ordering::Relaxed);
        let counter = match outcome {
            Propagation::Unlisted => &self.unlisted_updates,
            Propagation::Pending { .. } => &self.pending_stops,
            Propagation::ReachedRoot { .. } => &self.root_completions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let updates = self.updates.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            updates as f64 / secs
        } else {
            0.0
        };

        MetricsSnapshot {
            updates,
            valuations: self.valuations.load(Ordering::Relaxed),
            unlisted_updates: self.unlisted_updates.load(Ordering::Relaxed),
            pending_stops: self.pending_stops.load(Ordering::Relaxed),
            root_completions: self.root_completions.load(Ordering::Relaxed),
            chunks: self.chunks.load(Ordering::Relaxed),
            elapsed_ms: elapsed.as_millis() as u64,
            update_rate: rate,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSnapshot {
    /// Compact JSON for log lines
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
