//! Metrics registry
//!
//! - Counters only, monotonic, reset on process start
//! - Atomic with relaxed ordering

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    records_loaded: AtomicU64,
    fact_rebuilds: AtomicU64,
    profile_queries_executed: AtomicU64,
    profile_queries_rejected: AtomicU64,
    predictions_served: AtomicU64,
    predictions_rejected: AtomicU64,
    searches_executed: AtomicU64,
    models_trained: AtomicU64,
}

/// Global registry used by every component
pub static METRICS: MetricsRegistry = MetricsRegistry::new();

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_loaded: AtomicU64::new(0),
            fact_rebuilds: AtomicU64::new(0),
            profile_queries_executed: AtomicU64::new(0),
            profile_queries_rejected: AtomicU64::new(0),
            predictions_served: AtomicU64::new(0),
            predictions_rejected: AtomicU64::new(0),
            searches_executed: AtomicU64::new(0),
            models_trained: AtomicU64::new(0),
        }
    }

    pub fn add_records_loaded(&self, count: u64) {
        self.records_loaded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_fact_rebuilds(&self) {
        self.fact_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_profile_queries_executed(&self) {
        self.profile_queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_profile_queries_rejected(&self) {
        self.profile_queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_predictions_served(&self) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_predictions_rejected(&self) {
        self.predictions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_searches_executed(&self) {
        self.searches_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_models_trained(&self) {
        self.models_trained.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_loaded: self.records_loaded.load(Ordering::Relaxed),
            fact_rebuilds: self.fact_rebuilds.load(Ordering::Relaxed),
            profile_queries_executed: self.profile_queries_executed.load(Ordering::Relaxed),
            profile_queries_rejected: self.profile_queries_rejected.load(Ordering::Relaxed),
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            predictions_rejected: self.predictions_rejected.load(Ordering::Relaxed),
            searches_executed: self.searches_executed.load(Ordering::Relaxed),
            models_trained: self.models_trained.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub fact_rebuilds: u64,
    pub profile_queries_executed: u64,
    pub profile_queries_rejected: u64,
    pub predictions_served: u64,
    pub predictions_rejected: u64,
    pub searches_executed: u64,
    pub models_trained: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.records_loaded, 0);
        assert_eq!(snapshot.models_trained, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();
        registry.add_records_loaded(40);
        registry.increment_fact_rebuilds();
        registry.increment_profile_queries_executed();
        registry.increment_profile_queries_executed();
        registry.increment_profile_queries_rejected();
        registry.increment_predictions_served();
        registry.increment_predictions_rejected();
        registry.increment_searches_executed();
        registry.increment_models_trained();

        let s = registry.snapshot();
        assert_eq!(s.records_loaded, 40);
        assert_eq!(s.fact_rebuilds, 1);
        assert_eq!(s.profile_queries_executed, 2);
        assert_eq!(s.profile_queries_rejected, 1);
        assert_eq!(s.predictions_served, 1);
        assert_eq!(s.predictions_rejected, 1);
        assert_eq!(s.searches_executed, 1);
        assert_eq!(s.models_trained, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_searches_executed();
        let value = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(value["searches_executed"], 1);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_predictions_served();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.snapshot().predictions_served, 800);
    }
}
