//! Metrics collection for helpboard
//!
//! Prometheus counters for record operations, registered in a process-wide
//! registry and served as text at `/metrics`.

use crate::core::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, IntCounter, IntGauge, Registry,
};
use std::time::Instant;

/// Global metrics registry
static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Counters for record operations
pub struct OperationMetrics {
    /// Listing queries served
    pub queries: IntCounter,
    /// Single-record lookups served
    pub lookups: IntCounter,
    /// Lookups or updates that named an unknown identifier
    pub misses: IntCounter,
    /// Records created
    pub created: IntCounter,
    /// Records updated
    pub updated: IntCounter,
    /// Requests rejected for bad input
    pub rejected: IntCounter,
}

/// Gauges for store sizes
pub struct StoreMetrics {
    /// Business listings held in memory
    pub businesses: IntGauge,
    /// Help requests held in memory
    pub help_requests: IntGauge,
}

/// Centralized metrics collection
pub struct Metrics {
    /// Record operation counters
    pub operations: OperationMetrics,
    /// Store size gauges
    pub stores: StoreMetrics,
    /// Histogram of listing query durations in seconds
    pub query_duration: Histogram,
}

impl Metrics {
    /// Create new metrics instance
    pub fn new() -> Result<Self> {
        Ok(Self {
            operations: OperationMetrics::new()?,
            stores: StoreMetrics::new()?,
            query_duration: register_histogram_with_registry!(
                "hb_query_duration_seconds",
                "Duration of listing queries in seconds",
                vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1],
                REGISTRY
            )?,
        })
    }

    /// Get the global metrics instance
    pub fn global() -> &'static Metrics {
        static INSTANCE: Lazy<Metrics> = Lazy::new(|| {
            Metrics::new().expect("Failed to initialize metrics")
        });
        &INSTANCE
    }
}

impl OperationMetrics {
    fn new() -> Result<Self> {
        Ok(Self {
            queries: register_int_counter_with_registry!(
                "hb_queries_total",
                "Total number of listing queries",
                REGISTRY
            )?,
            lookups: register_int_counter_with_registry!(
                "hb_lookups_total",
                "Total number of single-record lookups",
                REGISTRY
            )?,
            misses: register_int_counter_with_registry!(
                "hb_not_found_total",
                "Total number of requests for unknown identifiers",
                REGISTRY
            )?,
            created: register_int_counter_with_registry!(
                "hb_records_created_total",
                "Total number of records created",
                REGISTRY
            )?,
            updated: register_int_counter_with_registry!(
                "hb_records_updated_total",
                "Total number of records updated",
                REGISTRY
            )?,
            rejected: register_int_counter_with_registry!(
                "hb_requests_rejected_total",
                "Total number of requests rejected for invalid input",
                REGISTRY
            )?,
        })
    }
}

impl StoreMetrics {
    fn new() -> Result<Self> {
        Ok(Self {
            businesses: register_int_gauge_with_registry!(
                "hb_businesses",
                "Number of business listings in memory",
                REGISTRY
            )?,
            help_requests: register_int_gauge_with_registry!(
                "hb_help_requests",
                "Number of help requests in memory",
                REGISTRY
            )?,
        })
    }
}

/// Timer for measuring operation duration with automatic histogram recording
pub struct Timer {
    start: Instant,
    histogram: Histogram,
}

impl Timer {
    /// Start a new timer
    pub fn start(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    /// Record the elapsed time and consume the timer
    pub fn finish(self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Initialize the metrics registry by creating the global metrics instance
pub fn init_registry() {
    let _ = Metrics::global();
}

/// Collect all metrics in the Prometheus text exposition format
pub fn collect_metrics() -> String {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}
