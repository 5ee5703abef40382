//! Decision metrics.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `janus_decisions_total` | Counter | `outcome` |
//! | `janus_decision_duration_seconds` | Histogram | - |
//!
//! Recording is a no-op until a recorder is installed.

use std::time::Duration;

use metrics::{counter, histogram};

/// Decisions by outcome.
pub const DECISIONS_TOTAL: &str = "janus_decisions_total";

/// Time spent per decision.
pub const DECISION_DURATION_SECONDS: &str = "janus_decision_duration_seconds";

/// Record one finished decision.
pub fn record_decision(outcome: &'static str, duration: Duration) {
    counter!(DECISIONS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(DECISION_DURATION_SECONDS).record(duration.as_secs_f64());
}
