//! Basic metrics instrumentation for index loading and queries.
//!
//! Provides counters and duration tracking for index loads and searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for the documentation server.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of index loads attempted
    index_loads_total: Arc<AtomicU64>,

    /// Total number of failed index loads
    index_load_errors_total: Arc<AtomicU64>,

    /// Total duration of all index loads in milliseconds
    index_load_duration_total_ms: Arc<AtomicU64>,

    /// Number of queries answered (search, lookup, symbol resolution)
    queries_total: Arc<AtomicU64>,

    /// Number of records returned across all queries
    records_served_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            index_loads_total: Arc::new(AtomicU64::new(0)),
            index_load_errors_total: Arc::new(AtomicU64::new(0)),
            index_load_duration_total_ms: Arc::new(AtomicU64::new(0)),
            queries_total: Arc::new(AtomicU64::new(0)),
            records_served_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an index load with duration.
    pub fn record_index_load(&self, duration: Duration) {
        self.index_loads_total.fetch_add(1, Ordering::Relaxed);
        self.index_load_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a failed index load.
    pub fn record_index_load_error(&self) {
        self.index_load_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answered query and how many records it returned.
    pub fn record_query(&self, records: usize) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        self.records_served_total
            .fetch_add(records as u64, Ordering::Relaxed);
    }

    /// Get total index loads.
    pub fn index_loads_total(&self) -> u64 {
        self.index_loads_total.load(Ordering::Relaxed)
    }

    /// Get total failed index loads.
    pub fn index_load_errors_total(&self) -> u64 {
        self.index_load_errors_total.load(Ordering::Relaxed)
    }

    /// Get total index load duration in milliseconds.
    pub fn index_load_duration_total_ms(&self) -> u64 {
        self.index_load_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average index load duration in milliseconds.
    pub fn index_load_duration_avg_ms(&self) -> f64 {
        let total = self.index_load_duration_total_ms.load(Ordering::Relaxed);
        let count = self.index_loads_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total queries answered.
    pub fn queries_total(&self) -> u64 {
        self.queries_total.load(Ordering::Relaxed)
    }

    /// Get total records served.
    pub fn records_served_total(&self) -> u64 {
        self.records_served_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            index_loads_total: self.index_loads_total(),
            index_load_errors_total: self.index_load_errors_total(),
            index_load_duration_total_ms: self.index_load_duration_total_ms(),
            index_load_duration_avg_ms: self.index_load_duration_avg_ms(),
            queries_total: self.queries_total(),
            records_served_total: self.records_served_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub index_loads_total: u64,
    pub index_load_errors_total: u64,
    pub index_load_duration_total_ms: u64,
    pub index_load_duration_avg_ms: f64,
    pub queries_total: u64,
    pub records_served_total: u64,
}

/// Helper for timing index loads.
pub struct LoadTimer {
    start: Instant,
    metrics: Metrics,
}

impl LoadTimer {
    /// Start timing an index load.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_index_load(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_index_load(self.start.elapsed());
        self.metrics.record_index_load_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.index_loads_total(), 0);
        assert_eq!(metrics.index_load_errors_total(), 0);
        assert_eq!(metrics.queries_total(), 0);
    }

    #[test]
    fn test_average_load_duration() {
        let metrics = Metrics::new();
        metrics.record_index_load(Duration::from_millis(100));
        metrics.record_index_load(Duration::from_millis(200));
        assert_eq!(metrics.index_loads_total(), 2);
        assert_eq!(metrics.index_load_duration_total_ms(), 300);
        assert_eq!(metrics.index_load_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_record_query() {
        let metrics = Metrics::new();
        metrics.record_query(3);
        metrics.record_query(0);
        assert_eq!(metrics.queries_total(), 2);
        assert_eq!(metrics.records_served_total(), 3);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_index_load(Duration::from_millis(40));
        metrics.record_index_load_error();
        metrics.record_query(7);

        let summary = metrics.summary();
        assert_eq!(summary.index_loads_total, 1);
        assert_eq!(summary.index_load_errors_total, 1);
        assert_eq!(summary.index_load_duration_total_ms, 40);
        assert_eq!(summary.records_served_total, 7);
    }

    #[test]
    fn test_load_timer_with_error() {
        let metrics = Metrics::new();
        let timer = LoadTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.index_loads_total(), 1);
        assert_eq!(metrics.index_load_errors_total(), 1);
    }

    #[test]
    fn test_load_timer_records_elapsed() {
        let metrics = Metrics::new();
        let timer = LoadTimer::new(metrics.clone());
        thread::sleep(Duration::from_millis(10));
        timer.complete();

        assert_eq!(metrics.index_loads_total(), 1);
        assert!(metrics.index_load_duration_total_ms() >= 10);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.record_query(1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.queries_total(), 200);
        assert_eq!(metrics.records_served_total(), 200);
    }
}
