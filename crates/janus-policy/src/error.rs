//! Policy construction errors.

use thiserror::Error;

/// Result type for policy construction.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Defects in the inputs to [`PolicyBuilder`](crate::PolicyBuilder).
///
/// These point at a bad resource descriptor or a caller bug, never at the
/// end user's credentials, so they are reported as server errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PolicyError {
    /// The HTTP verb is not one a statement may name.
    #[error("invalid HTTP verb {0:?}: allowed verbs are GET, POST, PUT, PATCH, HEAD, DELETE, OPTION and *")]
    InvalidMethod(String),

    /// The resource path contains characters outside the permitted set.
    #[error("invalid resource path {path:?}: path should match {pattern}")]
    InvalidResourcePath {
        /// The rejected path.
        path: String,
        /// Pattern the path must match.
        pattern: &'static str,
    },

    /// Neither allow nor deny entries were added.
    #[error("no statements defined for the policy")]
    EmptyPolicy,
}

impl PolicyError {
    /// Create an invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod(method.into())
    }

    /// Short label for metrics and structured logs.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidMethod(_) => "invalid_method",
            Self::InvalidResourcePath { .. } => "invalid_resource_path",
            Self::EmptyPolicy => "empty_policy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_method_display() {
        let err = PolicyError::invalid_method("TRACE");
        assert!(err.to_string().starts_with("invalid HTTP verb \"TRACE\""));
        assert_eq!(err.category(), "invalid_method");
    }

    #[test]
    fn test_empty_policy_display() {
        assert_eq!(PolicyError::EmptyPolicy.to_string(), "no statements defined for the policy");
    }
}
