//! Prometheus metrics for upstream calls and request validation.
//!
//! This module provides metrics for:
//! - Upstream request latency, per operation
//! - Upstream request and failure counts, per operation
//! - Requests rejected by parameter validation, per endpoint

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "upstream_failures_total";
/// Validation rejections counter metric name.
pub const METRIC_VALIDATION_REJECTIONS: &str = "validation_rejections_total";

/// Install the Prometheus recorder and describe all metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream spending API request latency in milliseconds"
    );

    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of requests sent to the upstream spending API"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of upstream requests that failed"
    );
    describe_counter!(
        METRIC_VALIDATION_REJECTIONS,
        "Total number of requests rejected by parameter validation"
    );

    debug!("Metrics initialized");
}

/// Record upstream request latency.
pub fn record_upstream_latency(start: Instant, operation: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY, "operation" => operation).record(latency_ms);
}

/// Increment upstream requests counter.
pub fn inc_upstream_requests(operation: &'static str) {
    counter!(METRIC_UPSTREAM_REQUESTS, "operation" => operation).increment(1);
}

/// Increment upstream failures counter.
pub fn inc_upstream_failures(operation: &'static str) {
    counter!(METRIC_UPSTREAM_FAILURES, "operation" => operation).increment(1);
}

/// Increment validation rejections counter.
pub fn inc_validation_rejections(endpoint: &'static str) {
    counter!(METRIC_VALIDATION_REJECTIONS, "endpoint" => endpoint).increment(1);
}

/// RAII guard for timing an upstream call.
/// Records latency under the operation label when dropped.
pub struct LatencyTimer {
    start: Instant,
    operation: &'static str,
}

impl LatencyTimer {
    /// Start timing the given upstream operation.
    pub fn upstream(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_upstream_latency(self.start, self.operation);
    }
}
