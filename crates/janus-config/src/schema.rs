//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};

/// Key store section: where signing keys are published.
///
/// # Example
///
/// ```
/// use janus_config::KeyStoreConfig;
///
/// let config = KeyStoreConfig {
///     host: "redis.internal".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.url(), "redis://redis.internal:6379/0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KeyStoreConfig {
    /// Redis host.
    #[serde(default = "default_key_store_host")]
    pub host: String,

    /// Redis port.
    #[serde(default = "default_key_store_port")]
    pub port: u16,

    /// Redis logical database.
    #[serde(default)]
    pub database: i64,

    /// Name of the set listing key ids. Each key's fields live in the hash
    /// `{key_set}:{kid}`.
    #[serde(default = "default_key_set")]
    pub key_set: String,
}

impl KeyStoreConfig {
    /// Connection URL for the configured server.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.database)
    }
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            host: default_key_store_host(),
            port: default_key_store_port(),
            database: 0,
            key_set: default_key_set(),
        }
    }
}

fn default_key_store_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_key_store_port() -> u16 {
    6379
}

fn default_key_set() -> String {
    "publicKey".to_string()
}

/// Token verification section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    /// Claim carrying the application payload.
    #[serde(default = "default_claims_field")]
    pub claims_field: String,

    /// Clock skew tolerated on `exp` and `nbf`, in seconds.
    #[serde(default)]
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            claims_field: default_claims_field(),
            leeway_secs: 0,
        }
    }
}

fn default_claims_field() -> String {
    "clientParams".to_string()
}

/// Decision section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthorizerSection {
    /// Principal identifier placed in every decision.
    #[serde(default = "default_principal_id")]
    pub principal_id: String,
}

impl Default for AuthorizerSection {
    fn default() -> Self {
        Self {
            principal_id: default_principal_id(),
        }
    }
}

fn default_principal_id() -> String {
    "janus".to_string()
}

/// HTTP server section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

const fn default_shutdown_timeout() -> u64 {
    30
}

const fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Enable metrics collection and the `/_janus/metrics` endpoint.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (e.g. "info", "janus_authz=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfigSection {
    /// Service name attached to log records.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TelemetryConfigSection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            metrics: MetricsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_service_name() -> String {
    "janus".to_string()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_store_config_default() {
        let config = KeyStoreConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.key_set, "publicKey");
        assert_eq!(config.url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_key_store_config_partial() {
        let config: KeyStoreConfig = toml::from_str(r#"host = "redis""#).unwrap();
        assert_eq!(config.host, "redis");
        assert_eq!(config.port, 6379);
    }

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.claims_field, "clientParams");
        assert_eq!(config.leeway_secs, 0);
    }

    #[test]
    fn test_server_config_unknown_field_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str(r#"listen = "0.0.0.0:80""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_deserialize() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(toml::from_str::<LoggingConfig>(r#"format = "xml""#).is_err());
    }
}
