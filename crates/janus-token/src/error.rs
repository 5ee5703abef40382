//! Verification errors.

use janus_core::AuthFailure;
use janus_keystore::KeyStoreError;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Result type for token verification.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Why [`TokenInspector::verify`](crate::TokenInspector::verify) produced no claims.
///
/// The two channels stay apart: a rejected token is final, an unreachable
/// key store is transient and the caller may retry.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The token was rejected.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// The key store could not be consulted.
    #[error(transparent)]
    KeyStoreUnavailable(#[from] KeyStoreError),
}

impl VerifyError {
    /// The rejection reason, if the token itself was at fault.
    pub const fn auth_failure(&self) -> Option<&AuthFailure> {
        match self {
            Self::Auth(failure) => Some(failure),
            Self::KeyStoreUnavailable(_) => None,
        }
    }

    /// Check if this is a retryable error.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::KeyStoreUnavailable(_))
    }
}

/// Map a `jsonwebtoken` decode failure onto the rejection taxonomy.
pub(crate) fn classify_jwt_error(err: &JwtError) -> AuthFailure {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthFailure::Expired,
        ErrorKind::ImmatureSignature => AuthFailure::NotYetValid,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidRsaKey(_) => {
            AuthFailure::InvalidSignature
        }
        ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthFailure::malformed(format!("undecodable token: {err}"))
        }
        _ => AuthFailure::malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_is_final() {
        let err = VerifyError::from(AuthFailure::Expired);
        assert!(!err.is_retryable());
        assert_eq!(err.auth_failure(), Some(&AuthFailure::Expired));
        assert_eq!(err.to_string(), "token expired");
    }

    #[test]
    fn test_key_store_unavailable_is_retryable() {
        let err = VerifyError::from(KeyStoreError::unavailable("connection refused"));
        assert!(err.is_retryable());
        assert!(err.auth_failure().is_none());
    }

    #[test]
    fn test_classify_jwt_error() {
        assert_eq!(
            classify_jwt_error(&ErrorKind::ExpiredSignature.into()),
            AuthFailure::Expired
        );
        assert_eq!(
            classify_jwt_error(&ErrorKind::ImmatureSignature.into()),
            AuthFailure::NotYetValid
        );
        assert_eq!(
            classify_jwt_error(&ErrorKind::InvalidAlgorithm.into()),
            AuthFailure::InvalidSignature
        );
        assert!(matches!(
            classify_jwt_error(&ErrorKind::InvalidToken.into()),
            AuthFailure::MalformedToken(_)
        ));
    }
}
