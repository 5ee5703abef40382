//! Wiring from [`JanusConfig`] to running components.

use std::sync::Arc;

use janus_authz::{Authorizer, AuthorizerConfig};
use janus_config::{JanusConfig, LogFormat, TelemetryConfigSection};
use janus_keystore::{KeyStore, RedisKeySource};
use janus_telemetry::{LogConfig, TelemetryConfig};
use janus_token::{InspectorConfig, TokenInspector};
use tracing::info;

use crate::error::ServerResult;

/// Translate the telemetry section into subsystem settings.
pub fn telemetry_config(section: &TelemetryConfigSection) -> TelemetryConfig {
    let pretty = section.logging.format == LogFormat::Pretty;
    let logging = LogConfig {
        enabled: section.logging.enabled,
        level: section.logging.level.clone(),
        json_format: !pretty,
        ansi: section.logging.ansi_enabled,
        span_events: pretty,
        file_line_info: pretty,
        ..LogConfig::default()
    };

    let metrics = janus_telemetry::MetricsConfig {
        enabled: section.metrics.enabled,
        ..janus_telemetry::MetricsConfig::default()
    };

    TelemetryConfig::builder()
        .service_name(&section.service_name)
        .service_version(crate::VERSION)
        .logging(logging)
        .metrics(metrics)
        .build()
}

/// Build the decision engine over `keys`.
pub fn build_authorizer(keys: KeyStore, config: &JanusConfig) -> Authorizer {
    let inspector = TokenInspector::new(
        keys,
        InspectorConfig::default()
            .with_claims_field(config.token.claims_field.clone())
            .with_leeway_secs(config.token.leeway_secs),
    );
    Authorizer::new(
        inspector,
        AuthorizerConfig::new().with_principal_id(config.authorizer.principal_id.clone()),
    )
}

/// Connect to the configured Redis key store.
pub async fn connect_key_store(config: &JanusConfig) -> ServerResult<KeyStore> {
    let settings = &config.key_store;
    let source = RedisKeySource::connect(
        &settings.host,
        settings.port,
        settings.database,
        settings.key_set.clone(),
    )
    .await?;

    let keys = KeyStore::new(Arc::new(source));
    keys.ping().await?;
    info!(host = %settings.host, port = settings.port, "key store reachable");
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use janus_test::{mint_token, sample_claims, seeded_store, KEY_A, RESOURCE_ARN};

    #[test]
    fn test_telemetry_config_production() {
        let config = telemetry_config(&JanusConfig::production().telemetry);
        assert!(config.logging.json_format);
        assert!(!config.logging.span_events);
        assert_eq!(config.logging.service_name, "janus");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_telemetry_config_development() {
        let config = telemetry_config(&JanusConfig::development().telemetry);
        assert!(!config.logging.json_format);
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_build_authorizer_uses_config() {
        let mut config = JanusConfig::default();
        config.authorizer.principal_id = "edge".to_string();
        config.token.claims_field = "ctx".to_string();

        let authorizer = build_authorizer(seeded_store(), &config);
        assert_eq!(authorizer.inspector().config().claims_field, "ctx");

        // Claims sit under the default field, so "ctx" is absent: deny.
        let token = mint_token(&KEY_A, &sample_claims());
        let decision = authorizer.decide(&token, RESOURCE_ARN).await.unwrap();
        assert_eq!(decision.principal_id, "edge");
        assert!(!decision.is_allow());
    }
}
