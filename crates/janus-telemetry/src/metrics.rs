//! Prometheus metrics for Janus.
//!
//! The recorder is installed once per process and rendered on demand by the
//! server's metrics endpoint; no separate listener is opened.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `janus_http_requests_total` | Counter | `endpoint`, `status` | HTTP requests served |
//! | `janus_http_request_duration_seconds` | Histogram | `endpoint` | HTTP latency |
//! | `janus_in_flight_requests` | Gauge | - | Requests being processed |
//! | `janus_decisions_total` | Counter | `outcome` | Authorization decisions |
//! | `janus_decision_duration_seconds` | Histogram | - | Decision latency |
//! | `janus_key_lookups_total` | Counter | `result` | Key store lookups |

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// HTTP requests served.
pub const HTTP_REQUESTS_TOTAL: &str = "janus_http_requests_total";

/// HTTP request latency.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "janus_http_request_duration_seconds";

/// Requests currently being processed.
pub const IN_FLIGHT_REQUESTS: &str = "janus_in_flight_requests";

const DECISIONS_TOTAL: &str = "janus_decisions_total";
const DECISION_DURATION_SECONDS: &str = "janus_decision_duration_seconds";
const KEY_LOOKUPS_TOTAL: &str = "janus_key_lookups_total";

/// Global metrics handle for rendering.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Histogram buckets for duration metrics, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 1ms .. 2.5s; a decision is one Redis round trip plus an RSA verify
            duration_buckets: vec![0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5],
        }
    }
}

/// Installs the global Prometheus recorder.
///
/// Calling this again after a successful install is a no-op.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidConfig` for empty buckets and
/// `TelemetryError::MetricsInit` if another recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    if config.duration_buckets.is_empty() {
        return Err(TelemetryError::InvalidConfig(
            "duration_buckets must not be empty".to_string(),
        ));
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("_duration_seconds".to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);

    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests served");
    describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        IN_FLIGHT_REQUESTS,
        "Number of HTTP requests currently being processed"
    );
    describe_counter!(DECISIONS_TOTAL, "Authorization decisions by outcome");
    describe_histogram!(
        DECISION_DURATION_SECONDS,
        "Time to reach an authorization decision in seconds"
    );
    describe_counter!(KEY_LOOKUPS_TOTAL, "Signing key lookups by result");
}

/// Records a served HTTP request.
pub fn record_request(endpoint: &'static str, status_code: u16, duration: Duration) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "endpoint" => endpoint,
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(HTTP_REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
        .record(duration.as_secs_f64());
}

/// Guard that tracks one in-flight request.
///
/// Increments the gauge on creation and decrements it on drop.
pub struct InFlightGuard {
    _private: (),
}

impl InFlightGuard {
    /// Creates a new guard and increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        gauge!(IN_FLIGHT_REQUESTS).increment(1.0);
        Self { _private: () }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        gauge!(IN_FLIGHT_REQUESTS).decrement(1.0);
    }
}
