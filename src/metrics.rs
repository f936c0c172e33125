// Metrics module - filter execution counters
// Tracks directive outcomes and surface pool activity for observability

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_applied: u64,
    pub filters_noop: u64,
    pub filters_failed: u64,
    pub filters_skipped: u64,
    pub surfaces_registered: u64,
    pub surfaces_released: u64,
}

/// FilterMetrics tracks directive and surface-pool counters.
/// Thread-safe via atomic operations and mutexes.
///
/// Skipped directives (unknown or administratively disabled names) are
/// counted per name so silently-ignored client typos stay observable.
pub struct FilterMetrics {
    // Directive outcome counters
    filters_applied: AtomicU64,
    filters_noop: AtomicU64,
    filters_failed: AtomicU64,

    // Skipped directive counters keyed by filter name
    skipped_filters: Mutex<HashMap<String, u64>>,

    // Surface pool counters (aggregated across request scopes)
    surfaces_registered: AtomicU64,
    surfaces_released: AtomicU64,
}

impl FilterMetrics {
    /// Create a new FilterMetrics instance
    pub fn new() -> Self {
        FilterMetrics {
            filters_applied: AtomicU64::new(0),
            filters_noop: AtomicU64::new(0),
            filters_failed: AtomicU64::new(0),
            skipped_filters: Mutex::new(HashMap::new()),
            surfaces_registered: AtomicU64::new(0),
            surfaces_released: AtomicU64::new(0),
        }
    }

    /// Increment the applied-directive count
    pub fn increment_applied(&self) {
        self.filters_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the vacuous-directive count (recognized name, no effect)
    pub fn increment_noop(&self) {
        self.filters_noop.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the failed-directive count
    pub fn increment_failed(&self) {
        self.filters_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the skip counter for a specific directive name
    pub fn increment_skipped(&self, name: &str) {
        if let Ok(mut counts) = self.skipped_filters.lock() {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    /// Record surface pool activity for one completed request scope
    pub fn record_pool_scope(&self, registered: u64, released: u64) {
        self.surfaces_registered.fetch_add(registered, Ordering::Relaxed);
        self.surfaces_released.fetch_add(released, Ordering::Relaxed);
    }

    /// Get skip count for a specific directive name
    pub fn get_skipped_count(&self, name: &str) -> u64 {
        self.skipped_filters
            .lock()
            .ok()
            .and_then(|counts| counts.get(name).copied())
            .unwrap_or(0)
    }

    /// Copy all counters into a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let filters_skipped = self
            .skipped_filters
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0);
        MetricsSnapshot {
            filters_applied: self.filters_applied.load(Ordering::Relaxed),
            filters_noop: self.filters_noop.load(Ordering::Relaxed),
            filters_failed: self.filters_failed.load(Ordering::Relaxed),
            filters_skipped,
            surfaces_registered: self.surfaces_registered.load(Ordering::Relaxed),
            surfaces_released: self.surfaces_released.load(Ordering::Relaxed),
        }
    }
}

impl Default for FilterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
