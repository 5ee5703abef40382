//! Configuration for the authorizer.

/// Principal identifier used when none is configured.
pub const DEFAULT_PRINCIPAL_ID: &str = "janus";

/// Configuration for [`Authorizer`](crate::Authorizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerConfig {
    /// Fixed principal identifier placed in every decision.
    pub principal_id: String,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            principal_id: DEFAULT_PRINCIPAL_ID.to_string(),
        }
    }
}

impl AuthorizerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the principal identifier.
    #[must_use]
    pub fn with_principal_id(mut self, principal_id: impl Into<String>) -> Self {
        self.principal_id = principal_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(AuthorizerConfig::default().principal_id, "janus");
    }

    #[test]
    fn test_builder_pattern() {
        let config = AuthorizerConfig::new().with_principal_id("edge-gateway");
        assert_eq!(config.principal_id, "edge-gateway");
    }
}
