//! Error types for key resolution.

use thiserror::Error;

/// Result type for key store operations.
pub type KeyStoreResult<T> = Result<T, KeyStoreError>;

/// Failures talking to the backing key store.
///
/// This is the transient channel: a missing or unreadable key is not an
/// error at this level, it is reported as `Ok(None)` by
/// [`KeyStore::lookup`](crate::KeyStore::lookup).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyStoreError {
    /// The backing store could not be reached or answered with an error.
    #[error("key store unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
        /// Underlying cause, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl KeyStoreError {
    /// Create an unavailable error without a source.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Check if this is a retryable error.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<redis::RedisError> for KeyStoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Unavailable {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Stored key material that cannot be turned into a [`SigningKey`].
///
/// Only ever logged; the affected identifier resolves as not found.
///
/// [`SigningKey`]: crate::SigningKey
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key material for {kid}: {reason}")]
pub struct KeyParseError {
    /// Key identifier whose material was rejected.
    pub kid: String,
    /// What was wrong with it.
    pub reason: String,
}

impl KeyParseError {
    pub(crate) fn new(kid: &str, reason: impl Into<String>) -> Self {
        Self {
            kid: kid.to_string(),
            reason: reason.into(),
        }
    }
}
