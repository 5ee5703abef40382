//! Error types for authorization decisions.

use janus_core::{AuthFailure, ResourceError};
use janus_keystore::KeyStoreError;
use janus_policy::PolicyError;
use janus_token::VerifyError;
use thiserror::Error;

/// Result type for authorization decisions.
pub type DecisionResult<T> = Result<T, DecisionError>;

/// Why no decision was produced.
///
/// A deny policy is a decision, not an error. These variants are the
/// absence of a decision, and the caller must not turn any of them into a
/// partial policy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecisionError {
    /// The token was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(AuthFailure),

    /// The resource ARN could not be parsed.
    #[error(transparent)]
    InvalidResource(#[from] ResourceError),

    /// The policy could not be built for the resource.
    #[error("policy construction failed: {0}")]
    Policy(#[from] PolicyError),

    /// The key store could not be reached.
    #[error(transparent)]
    KeyStoreUnavailable(KeyStoreError),

    /// The claims could not be serialized into the decision context.
    #[error("failed to encode claims: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<VerifyError> for DecisionError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Auth(failure) => Self::Unauthorized(failure),
            VerifyError::KeyStoreUnavailable(source) => Self::KeyStoreUnavailable(source),
        }
    }
}

impl From<AuthFailure> for DecisionError {
    fn from(failure: AuthFailure) -> Self {
        Self::Unauthorized(failure)
    }
}

impl DecisionError {
    /// Check if this is an unauthorized error.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a retryable error.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::KeyStoreUnavailable(_))
    }

    /// HTTP status an entry point should answer with.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::InvalidResource(_) => 400,
            Self::KeyStoreUnavailable(_) => 503,
            Self::Policy(_) | Self::Encoding(_) => 500,
        }
    }

    /// Outcome label for metrics and logs.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::InvalidResource(_) => "invalid_resource",
            Self::Policy(_) => "policy_error",
            Self::KeyStoreUnavailable(_) => "key_store_unavailable",
            Self::Encoding(_) => "encoding_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_error() {
        let err = DecisionError::from(AuthFailure::Expired);
        assert!(err.is_unauthorized());
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_string(), "unauthorized: token expired");
    }

    #[test]
    fn test_verify_error_channels_stay_apart() {
        let auth = DecisionError::from(VerifyError::Auth(AuthFailure::unknown_key("k1")));
        assert_eq!(auth.category(), "unauthorized");

        let outage = DecisionError::from(VerifyError::KeyStoreUnavailable(
            KeyStoreError::unavailable("connection refused"),
        ));
        assert!(outage.is_retryable());
        assert!(!outage.is_unauthorized());
        assert_eq!(outage.status_code(), 503);
    }

    #[test]
    fn test_policy_errors_are_server_errors() {
        let err = DecisionError::from(PolicyError::EmptyPolicy);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.category(), "policy_error");
    }

    #[test]
    fn test_invalid_resource_is_client_error() {
        let err = DecisionError::from(ResourceError::new("nope", "expected 6 colon-separated fields, found 1"));
        assert_eq!(err.status_code(), 400);
    }
}
