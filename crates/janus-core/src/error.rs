//! Failure types shared across the decision pipeline.
//!
//! [`AuthFailure`] describes why a bearer token was rejected. Every variant
//! surfaces to the caller as an unauthorized outcome; the variants exist so
//! that logs and metrics can tell them apart.

use thiserror::Error;

/// Reasons a token failed verification.
///
/// None of these are retried: parsing and cryptographic checks are
/// deterministic for a given token and key set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AuthFailure {
    /// The token is not a three-segment JWT or its header cannot be read.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The token's key identifier is not present in the key store.
    #[error("unknown signing key: {kid}")]
    UnknownKey {
        /// Key identifier taken from the token header.
        kid: String,
    },

    /// The token's `exp` claim is in the past.
    #[error("token expired")]
    Expired,

    /// The token's `nbf` claim is in the future.
    #[error("token not yet valid")]
    NotYetValid,

    /// The signature does not verify against the resolved key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The application claim payload is present but is not a structured object.
    #[error("invalid claim payload: {0}")]
    InvalidPayload(String),
}

impl AuthFailure {
    /// Create a malformed token failure.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken(reason.into())
    }

    /// Create an unknown key failure.
    pub fn unknown_key(kid: impl Into<String>) -> Self {
        Self::UnknownKey { kid: kid.into() }
    }

    /// Create an invalid payload failure.
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload(reason.into())
    }

    /// Short label for metrics and structured logs.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MalformedToken(_) => "malformed_token",
            Self::UnknownKey { .. } => "unknown_key",
            Self::Expired => "expired",
            Self::NotYetValid => "not_yet_valid",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidPayload(_) => "invalid_payload",
        }
    }
}

/// A resource ARN that could not be parsed into a [`ResourceDescriptor`].
///
/// [`ResourceDescriptor`]: crate::ResourceDescriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid resource {arn:?}: {reason}")]
pub struct ResourceError {
    /// The rejected input.
    pub arn: String,
    /// What was wrong with it.
    pub reason: String,
}

impl ResourceError {
    /// Create a new resource error.
    pub fn new(arn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_display() {
        assert_eq!(
            AuthFailure::unknown_key("key-1").to_string(),
            "unknown signing key: key-1"
        );
        assert_eq!(AuthFailure::Expired.to_string(), "token expired");
        assert_eq!(
            AuthFailure::malformed("expected 3 segments").to_string(),
            "malformed token: expected 3 segments"
        );
    }

    #[test]
    fn test_auth_failure_reasons_are_distinct() {
        let reasons = [
            AuthFailure::malformed("x").reason(),
            AuthFailure::unknown_key("k").reason(),
            AuthFailure::Expired.reason(),
            AuthFailure::NotYetValid.reason(),
            AuthFailure::InvalidSignature.reason(),
            AuthFailure::invalid_payload("x").reason(),
        ];
        let unique: std::collections::HashSet<_> = reasons.iter().collect();
        assert_eq!(unique.len(), reasons.len());
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::new("arn:bad", "expected 6 colon-separated fields");
        assert_eq!(
            err.to_string(),
            "invalid resource \"arn:bad\": expected 6 colon-separated fields"
        );
    }
}
