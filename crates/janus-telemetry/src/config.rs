//! Telemetry configuration.

use crate::logging::LogConfig;
use crate::metrics::MetricsConfig;

/// Configuration for all telemetry subsystems.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name, attached to every log line.
    pub service_name: String,

    /// Service version.
    pub service_version: String,

    /// Metrics configuration.
    pub metrics: MetricsConfig,

    /// Logging configuration.
    pub logging: LogConfig,
}

impl TelemetryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "janus".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            metrics: MetricsConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    service_version: Option<String>,
    metrics: Option<MetricsConfig>,
    logging: Option<LogConfig>,
}

impl TelemetryConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Sets the service version.
    #[must_use]
    pub fn service_version(mut self, version: &str) -> Self {
        self.service_version = Some(version.to_string());
        self
    }

    /// Sets the metrics configuration.
    #[must_use]
    pub fn metrics(mut self, config: MetricsConfig) -> Self {
        self.metrics = Some(config);
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn logging(mut self, config: LogConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        let defaults = TelemetryConfig::default();

        let service_name = self.service_name.unwrap_or(defaults.service_name);
        let service_version = self.service_version.unwrap_or(defaults.service_version);

        let metrics = self.metrics.unwrap_or(defaults.metrics);

        let mut logging = self.logging.unwrap_or(defaults.logging);
        logging.service_name = service_name.clone();

        TelemetryConfig {
            service_name,
            service_version,
            metrics,
            logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "janus");
        assert!(config.metrics.enabled);
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_builder_propagates_service_name() {
        let config = TelemetryConfig::builder()
            .service_name("edge-authorizer")
            .service_version("2.0.0")
            .logging(LogConfig::development())
            .build();

        assert_eq!(config.service_name, "edge-authorizer");
        assert_eq!(config.service_version, "2.0.0");
        assert_eq!(config.logging.service_name, "edge-authorizer");
        assert!(!config.logging.json_format);
    }
}
