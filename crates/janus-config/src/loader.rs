//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, JanusConfig, LogFormat};

/// Host variable set by deployments that predate the prefixed scheme.
pub const LEGACY_HOST_VAR: &str = "REDISHOST";

/// Port variable set by deployments that predate the prefixed scheme.
pub const LEGACY_PORT_VAR: &str = "REDISPORT";

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use janus_config::ConfigLoader;
///
/// # fn main() -> Result<(), janus_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("janus.toml")?
///     .with_env_prefix("JANUS")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: JanusConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: JanusConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    ///
    /// This is called automatically by `new()`, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = JanusConfig::default();
        self
    }

    /// Start with development preset configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use janus_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = JanusConfig::development();
        self
    }

    /// Start with production preset configuration.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = JanusConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// Supports TOML (.toml) and JSON (.json) formats, chosen by extension.
    /// Sections missing from the file take their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or unreadable, is not
    /// valid TOML/JSON, or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from an optional file.
    ///
    /// If the file exists, loads it. If not, silently continues.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or the format is neither
    /// "toml" nor "json".
    ///
    /// # Example
    ///
    /// ```
    /// use janus_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [key_store]
    ///     host = "redis.internal"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.key_store.host, "redis.internal");
    /// assert_eq!(config.key_store.port, 6379);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`.
    /// For example, with prefix "JANUS":
    /// - `JANUS__KEY_STORE__HOST=redis.internal`
    /// - `JANUS__TELEMETRY__LOGGING__LEVEL=debug`
    ///
    /// `REDISHOST` and `REDISPORT` are also honoured for the key store when
    /// the prefixed variables are not set.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file for environment variables.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::validation_error(format!(
                "failed to load .env file: {e}"
            ))),
        }
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable cannot be parsed or
    /// the configuration is invalid.
    pub fn load(mut self) -> Result<JanusConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let vars: HashMap<String, String> = env::vars().collect();
            self.apply_env_overrides(&prefix, &vars)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Finalize without validation.
    #[must_use]
    pub fn load_unvalidated(self) -> JanusConfig {
        self.config
    }

    // Parse configuration file based on extension
    fn parse_file(content: &str, path: &Path) -> Result<JanusConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    // Legacy variables first, so prefixed ones win.
    fn apply_env_overrides(
        &mut self,
        prefix: &str,
        vars: &HashMap<String, String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = vars.get(LEGACY_HOST_VAR) {
            self.apply_env_var(&format!("{prefix}__KEY_STORE__HOST"), host, prefix)?;
        }
        if let Some(port) = vars.get(LEGACY_PORT_VAR) {
            self.apply_env_var(&format!("{prefix}__KEY_STORE__PORT"), port, prefix)
                .map_err(|_| ConfigError::env_parse_error(LEGACY_PORT_VAR, "expected port number"))?;
        }

        let mut prefixed: Vec<(&String, &String)> = vars
            .iter()
            .filter(|(k, _)| k.starts_with(prefix) && k[prefix.len()..].starts_with("__"))
            .collect();
        prefixed.sort();

        for (key, value) in prefixed {
            self.apply_env_var(key, value, prefix)?;
        }

        Ok(())
    }

    // Apply a single environment variable
    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            // Key store section
            ["KEY_STORE", "HOST"] => {
                self.config.key_store.host = value.to_string();
            }
            ["KEY_STORE", "PORT"] => {
                self.config.key_store.port = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected port number"))?;
            }
            ["KEY_STORE", "DATABASE"] => {
                self.config.key_store.database = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }
            ["KEY_STORE", "KEY_SET"] => {
                self.config.key_store.key_set = value.to_string();
            }

            // Token section
            ["TOKEN", "CLAIMS_FIELD"] => {
                self.config.token.claims_field = value.to_string();
            }
            ["TOKEN", "LEEWAY_SECS"] => {
                self.config.token.leeway_secs = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            // Authorizer section
            ["AUTHORIZER", "PRINCIPAL_ID"] => {
                self.config.authorizer.principal_id = value.to_string();
            }

            // Server section
            ["SERVER", "HTTP_ADDR"] => {
                self.config.server.http_addr = value.to_string();
            }
            ["SERVER", "SHUTDOWN_TIMEOUT_SECS"] => {
                self.config.server.shutdown_timeout_secs = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }
            ["SERVER", "MAX_BODY_BYTES"] => {
                self.config.server.max_body_bytes = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            // Telemetry section
            ["TELEMETRY", "SERVICE_NAME"] => {
                self.config.telemetry.service_name = value.to_string();
            }
            ["TELEMETRY", "METRICS", "ENABLED"] => {
                self.config.telemetry.metrics.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                self.config.telemetry.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => {
                self.config.telemetry.logging.level = value.to_string();
            }
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                self.config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["TELEMETRY", "LOGGING", "ANSI_ENABLED"] => {
                self.config.telemetry.logging.ansi_enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            // Unknown key - ignore
            _ => {}
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
