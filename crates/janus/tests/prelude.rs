//! The facade wires together into a working authorizer.

use janus::prelude::*;
use janus_test::{mint_token, sample_claims, seeded_store, KEY_B, RESOURCE_ARN};

#[tokio::test]
async fn test_authorizer_from_prelude() {
    let authorizer = Authorizer::new(
        TokenInspector::new(seeded_store(), InspectorConfig::default()),
        AuthorizerConfig::default(),
    );

    let token = mint_token(&KEY_B, &sample_claims());
    let decision: Decision = authorizer.decide(&token, RESOURCE_ARN).await.unwrap();

    assert!(decision.is_allow());
    assert_eq!(decision.effect(), Effect::Allow);
    assert_eq!(decision.decoded_claims().unwrap().get("tenant").unwrap(), "acme");
}

#[tokio::test]
async fn test_config_drives_authorizer() {
    let config: JanusConfig = ConfigLoader::new()
        .with_string("[authorizer]\nprincipal_id = \"gateway\"\n", "toml")
        .unwrap()
        .load()
        .unwrap();

    let authorizer = Authorizer::new(
        TokenInspector::new(seeded_store(), InspectorConfig::default()),
        AuthorizerConfig::new().with_principal_id(config.authorizer.principal_id),
    );

    let err = authorizer.decide("garbage", RESOURCE_ARN).await.unwrap_err();
    assert!(matches!(err, DecisionError::Unauthorized(AuthFailure::MalformedToken(_))));
}
