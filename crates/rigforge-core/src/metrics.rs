//! Global atomic counters for Rigforge observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. when a CLI command finishes).

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lock-free atomic counters.
pub struct Metrics {
    evaluations: AtomicU64,
    builds_saved: AtomicU64,
    builds_deleted: AtomicU64,
    storage_failures: AtomicU64,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub evaluations: u64,
    pub builds_saved: u64,
    pub builds_deleted: u64,
    pub storage_failures: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            evaluations: AtomicU64::new(0),
            builds_saved: AtomicU64::new(0),
            builds_deleted: AtomicU64::new(0),
            storage_failures: AtomicU64::new(0),
        }
    }

    pub fn inc_evaluations(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "evaluations", "counter incremented");
    }

    pub fn inc_builds_saved(&self) {
        self.builds_saved.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "builds_saved", "counter incremented");
    }

    pub fn inc_builds_deleted(&self) {
        self.builds_deleted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "builds_deleted", "counter incremented");
    }

    pub fn inc_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "storage_failures", "counter incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            builds_saved: self.builds_saved.load(Ordering::Relaxed),
            builds_deleted: self.builds_deleted.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        let s = self.snapshot();
        tracing::info!(
            metric = "flush",
            evaluations = s.evaluations,
            builds_saved = s.builds_saved,
            builds_deleted = s.builds_deleted,
            storage_failures = s.storage_failures,
        );
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
        self.builds_saved.store(0, Ordering::Relaxed);
        self.builds_deleted.store(0, Ordering::Relaxed);
        self.storage_failures.store(0, Ordering::Relaxed);
    }
}
