//! Recorder installation.
//!
//! Kept in its own test binary because the recorder is process-global.

use std::time::Duration;

use janus_telemetry::{init_metrics, record_request, render_metrics, MetricsConfig};

#[test]
fn test_init_metrics_then_render() {
    init_metrics(&MetricsConfig::default()).unwrap();
    // Second install is ignored.
    init_metrics(&MetricsConfig::default()).unwrap();

    record_request("authorize", 200, Duration::from_millis(4));
    metrics::counter!("janus_decisions_total", "outcome" => "allow").increment(1);

    let rendered = render_metrics().unwrap();
    assert!(rendered.contains("janus_http_requests_total"));
    assert!(rendered.contains("endpoint=\"authorize\""));
    assert!(rendered.contains("janus_decisions_total{outcome=\"allow\"} 1"));
    assert!(rendered.contains("janus_http_request_duration_seconds_bucket"));
}
