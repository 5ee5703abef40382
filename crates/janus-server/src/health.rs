//! Liveness and readiness reporting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use janus_keystore::KeyStore;
use serde::{Deserialize, Serialize};

/// Health status of the process.
///
/// Liveness only reports that the process answers; dependency failures
/// surface through [`ReadinessStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Serving.
    Healthy,
}

/// Readiness status of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// Ready to take traffic.
    Ready,
    /// Not ready.
    NotReady,
}

impl ReadinessStatus {
    /// Check if the server is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Liveness response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status.
    pub status: HealthStatus,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Version information.
    pub version: String,
}

/// Readiness response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status.
    pub status: ReadinessStatus,
    /// Individual check results.
    pub checks: Vec<CheckResult>,
}

/// Result of a single readiness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Time taken for the check in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: None,
            duration_ms: None,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
            duration_ms: None,
        }
    }

    /// Set the duration.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

/// Tracks process readiness and probes the key store.
#[derive(Debug)]
pub struct HealthChecker {
    start_time: Instant,
    ready: AtomicBool,
    keys: KeyStore,
}

impl HealthChecker {
    /// Create a checker probing `keys`. Starts not ready.
    pub fn new(keys: KeyStore) -> Self {
        Self {
            start_time: Instant::now(),
            ready: AtomicBool::new(false),
            keys,
        }
    }

    /// Mark the server as ready (listening) or draining.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if the server is accepting traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Get the uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Perform a liveness check.
    pub fn liveness(&self) -> HealthResponse {
        HealthResponse {
            status: HealthStatus::Healthy,
            uptime_seconds: self.uptime().as_secs(),
            version: crate::VERSION.to_string(),
        }
    }

    /// Perform a readiness check.
    ///
    /// Ready means the listener is up and the key store answers a ping.
    pub async fn readiness(&self) -> ReadinessResponse {
        let listener = if self.is_ready() {
            CheckResult::pass("listener")
        } else {
            CheckResult::fail("listener", "not accepting connections")
        };
        let checks = vec![listener, self.check_key_store().await];

        let status = if checks.iter().all(|c| c.passed) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };

        ReadinessResponse { status, checks }
    }

    /// Ping the key store.
    pub async fn check_key_store(&self) -> CheckResult {
        let start = Instant::now();
        match self.keys.ping().await {
            Ok(()) => CheckResult::pass("key_store").with_duration(start.elapsed()),
            Err(e) => CheckResult::fail("key_store", e.to_string()).with_duration(start.elapsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use janus_keystore::MemoryKeySource;

    fn checker() -> (Arc<MemoryKeySource>, HealthChecker) {
        let source = Arc::new(MemoryKeySource::new());
        let checker = HealthChecker::new(KeyStore::new(source.clone()));
        (source, checker)
    }

    #[test]
    fn test_check_result() {
        let pass = CheckResult::pass("key_store").with_duration(Duration::from_millis(7));
        assert!(pass.passed);
        assert_eq!(pass.duration_ms, Some(7));

        let fail = CheckResult::fail("key_store", "offline");
        assert!(!fail.passed);
        assert_eq!(fail.message.as_deref(), Some("offline"));
    }

    #[tokio::test]
    async fn test_liveness_ignores_key_store() {
        let (source, checker) = checker();
        source.set_available(false);

        let response = checker.liveness();
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.version, crate::VERSION);
        assert_eq!(serde_json::to_value(response.status).unwrap(), "healthy");
    }

    #[tokio::test]
    async fn test_readiness_requires_listener() {
        let (_, checker) = checker();
        assert_eq!(checker.readiness().await.status, ReadinessStatus::NotReady);

        checker.set_ready(true);
        assert!(checker.readiness().await.status.is_ready());
    }

    #[tokio::test]
    async fn test_readiness_follows_key_store() {
        let (source, checker) = checker();
        checker.set_ready(true);
        source.set_available(false);

        let response = checker.readiness().await;
        assert_eq!(response.status, ReadinessStatus::NotReady);
        let key_store = response.checks.iter().find(|c| c.name == "key_store").unwrap();
        assert!(!key_store.passed);

        source.set_available(true);
        assert!(checker.readiness().await.status.is_ready());
    }

    #[test]
    fn test_readiness_serialization() {
        let json = serde_json::to_value(ReadinessStatus::NotReady).unwrap();
        assert_eq!(json, "not_ready");
    }
}
