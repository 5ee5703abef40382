//! Error types for the Janus server.

use std::fmt;

use janus_config::ConfigError;
use janus_keystore::KeyStoreError;
use janus_telemetry::TelemetryError;
use thiserror::Error;

/// Errors raised while starting or running the server.
///
/// Per-request failures never surface here; they become HTTP responses.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging or metrics could not be installed.
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// The key store could not be reached at startup.
    #[error("Key store error: {0}")]
    KeyStore(#[from] KeyStoreError),

    /// Listener setup failed.
    #[error("Server error: {message}")]
    Server {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Check if retrying startup may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::KeyStore(e) if e.is_retryable())
    }

    /// Get the error category for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Telemetry(_) => "telemetry",
            Self::KeyStore(_) => "key_store",
            Self::Server { .. } => "server",
            Self::Io(_) => "io",
        }
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// HTTP reason phrase, e.g. `"Unauthorized"`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            request_id: None,
        }
    }

    /// Set the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = ServerError::server("bind failed");
        assert_eq!(err.category(), "server");
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Server error: bind failed");

        let err = ServerError::from(KeyStoreError::unavailable("connection refused"));
        assert_eq!(err.category(), "key_store");
        assert!(err.is_recoverable());

        let err = ServerError::from(ConfigError::validation_error("bad"));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_error_response() {
        let resp = ErrorResponse::new("Unauthorized", "Unauthorized").with_request_id("req-1");
        assert_eq!(resp.to_string(), "[Unauthorized] Unauthorized");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "Unauthorized");
        assert_eq!(json["request_id"], "req-1");

        let json = serde_json::to_value(ErrorResponse::new("Bad Request", "x")).unwrap();
        assert!(json.get("request_id").is_none());
    }
}
