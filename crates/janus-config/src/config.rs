//! Main configuration types.
//!
//! This module provides the top-level [`JanusConfig`] struct and its builder.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::{
    AuthorizerSection, ConfigError, KeyStoreConfig, LogFormat, ServerConfig,
    TelemetryConfigSection, TokenConfig,
};

/// Largest accepted `token.leeway_secs`.
pub const MAX_TOKEN_LEEWAY_SECS: u64 = 3600;

/// Complete Janus configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use janus_config::JanusConfig;
///
/// let config = JanusConfig::default();
/// assert_eq!(config.key_store.port, 6379);
/// assert_eq!(config.server.http_addr, "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct JanusConfig {
    /// Key store connection.
    #[serde(default)]
    pub key_store: KeyStoreConfig,

    /// Token verification.
    #[serde(default)]
    pub token: TokenConfig,

    /// Decision settings.
    #[serde(default)]
    pub authorizer: AuthorizerSection,

    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Metrics and logging.
    #[serde(default)]
    pub telemetry: TelemetryConfigSection,
}

impl JanusConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> JanusConfigBuilder {
        JanusConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_store.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("key_store.host", "must not be empty"));
        }
        if self.key_store.port == 0 {
            return Err(ConfigError::invalid_value("key_store.port", "must not be 0"));
        }
        if self.key_store.database < 0 {
            return Err(ConfigError::invalid_value(
                "key_store.database",
                "must not be negative",
            ));
        }
        if self.key_store.key_set.is_empty() {
            return Err(ConfigError::invalid_value("key_store.key_set", "must not be empty"));
        }
        if self.token.claims_field.is_empty() {
            return Err(ConfigError::invalid_value("token.claims_field", "must not be empty"));
        }
        if self.token.leeway_secs > MAX_TOKEN_LEEWAY_SECS {
            return Err(ConfigError::invalid_value(
                "token.leeway_secs",
                format!("must not exceed {MAX_TOKEN_LEEWAY_SECS}"),
            ));
        }
        if self.authorizer.principal_id.is_empty() {
            return Err(ConfigError::invalid_value(
                "authorizer.principal_id",
                "must not be empty",
            ));
        }
        if self.server.http_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value("server.max_body_bytes", "must not be 0"));
        }
        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored, debug-level logs and a one-minute token leeway.
    ///
    /// # Example
    ///
    /// ```
    /// use janus_config::JanusConfig;
    ///
    /// let config = JanusConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.ansi_enabled = true;
        config.server.http_addr = "127.0.0.1:8080".to_string();
        config.token.leeway_secs = 60;
        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level, no token leeway.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config.telemetry.logging.ansi_enabled = false;
        config.token.leeway_secs = 0;
        config
    }
}

/// Builder for [`JanusConfig`].
#[derive(Debug, Default)]
pub struct JanusConfigBuilder {
    config: JanusConfig,
}

impl JanusConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key store section.
    #[must_use]
    pub fn key_store(mut self, key_store: KeyStoreConfig) -> Self {
        self.config.key_store = key_store;
        self
    }

    /// Set the token section.
    #[must_use]
    pub fn token(mut self, token: TokenConfig) -> Self {
        self.config.token = token;
        self
    }

    /// Set the authorizer section.
    #[must_use]
    pub fn authorizer(mut self, authorizer: AuthorizerSection) -> Self {
        self.config.authorizer = authorizer;
        self
    }

    /// Set the server section.
    #[must_use]
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Set the telemetry section.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetryConfigSection) -> Self {
        self.config.telemetry = telemetry;
        self
    }

    /// Build the configuration without validation.
    #[must_use]
    pub fn build(self) -> JanusConfig {
        self.config
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<JanusConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(JanusConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sections() {
        let config = JanusConfig::builder()
            .key_store(KeyStoreConfig {
                host: "redis".to_string(),
                port: 6380,
                ..Default::default()
            })
            .authorizer(AuthorizerSection {
                principal_id: "edge".to_string(),
            })
            .build();

        assert_eq!(config.key_store.host, "redis");
        assert_eq!(config.key_store.port, 6380);
        assert_eq!(config.authorizer.principal_id, "edge");
    }

    #[test]
    fn test_validate_empty_host() {
        let result = JanusConfig::builder()
            .key_store(KeyStoreConfig {
                host: "  ".to_string(),
                ..Default::default()
            })
            .build_validated();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "key_store.host"
        ));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = JanusConfig::default();
        config.key_store.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_claims_field() {
        let mut config = JanusConfig::default();
        config.token.claims_field = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_leeway_bound() {
        let mut config = JanusConfig::default();
        config.token.leeway_secs = MAX_TOKEN_LEEWAY_SECS;
        assert!(config.validate().is_ok());

        config.token.leeway_secs = u64::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "token.leeway_secs"
        ));
    }

    #[test]
    fn test_validate_invalid_http_addr() {
        let mut config = JanusConfig::default();
        config.server.http_addr = "localhost".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.http_addr"));
    }

    #[test]
    fn test_development_preset() {
        let config = JanusConfig::development();
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
        assert_eq!(config.token.leeway_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_preset() {
        let config = JanusConfig::production();
        assert_eq!(config.telemetry.logging.format, LogFormat::Json);
        assert_eq!(config.token.leeway_secs, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = JanusConfig::development();
        let text = toml::to_string(&config).unwrap();
        let parsed: JanusConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<JanusConfig, _> = toml::from_str("[cache]\nttl = 5\n");
        assert!(result.is_err());
    }
}
