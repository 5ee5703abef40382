//! Token verification.

use std::collections::HashSet;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use janus_core::{AuthFailure, ResourceDescriptor, VerifiedClaims};
use janus_keystore::{KeyStore, SigningKey};
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::{InspectorConfig, MAX_LEEWAY_SECS};
use crate::error::{classify_jwt_error, VerifyResult};

/// base64url that tolerates both padded and unpadded input.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The header fields read before the signature is checked.
#[derive(Debug, Deserialize)]
struct UnverifiedHeader {
    kid: Option<String>,
    alg: Option<String>,
}

/// Verifies bearer tokens against the key store and extracts their claims.
///
/// Holds no per-request state; one inspector serves concurrent requests.
#[derive(Debug, Clone)]
pub struct TokenInspector {
    keys: KeyStore,
    config: InspectorConfig,
}

impl TokenInspector {
    /// Create an inspector resolving keys from `keys`.
    pub fn new(keys: KeyStore, config: InspectorConfig) -> Self {
        Self { keys, config }
    }

    /// The key store used for lookups.
    pub fn key_store(&self) -> &KeyStore {
        &self.keys
    }

    /// Current configuration.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Verify `raw_token` and return its application claims.
    ///
    /// The token must be a three-segment JWT whose header names a published
    /// key. Its signature and its `exp`/`nbf` claims, when present, are
    /// checked. A verified token without an application payload yields empty
    /// claims, not an error.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Auth`](crate::VerifyError::Auth) when the token is
    /// rejected, [`VerifyError::KeyStoreUnavailable`](crate::VerifyError::KeyStoreUnavailable)
    /// when the key store cannot be reached.
    #[instrument(
        name = "verify_token",
        skip(self, raw_token, resource),
        fields(api_id = %resource.api_id(), stage = %resource.stage(), kid = tracing::field::Empty)
    )]
    pub async fn verify(
        &self,
        raw_token: &str,
        resource: &ResourceDescriptor,
    ) -> VerifyResult<VerifiedClaims> {
        let header = read_header(raw_token)?;
        let kid = header
            .kid
            .filter(|kid| !kid.is_empty())
            .ok_or_else(|| AuthFailure::malformed("header has no key id"))?;
        tracing::Span::current().record("kid", kid.as_str());

        let key = self
            .keys
            .lookup(&kid)
            .await?
            .ok_or_else(|| AuthFailure::unknown_key(&kid))?;

        if let Some(alg) = header.alg.as_deref() {
            debug!(alg, expected = ?key.algorithm(), "verifying signature");
        }

        let payload = self.decode(raw_token, &key)?;
        let claims = extract_claims(&payload, &self.config.claims_field)?;
        debug!(claims = claims.len(), "token verified");
        Ok(claims)
    }

    fn decode(&self, raw_token: &str, key: &SigningKey) -> Result<Map<String, Value>, AuthFailure> {
        let mut validation = Validation::new(key.algorithm());
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = self.config.leeway_secs.min(MAX_LEEWAY_SECS);

        let payload =
            jsonwebtoken::decode::<Map<String, Value>>(raw_token, key.decoding_key(), &validation)
                .map(|data| data.claims)
                .map_err(|e| classify_jwt_error(&e))?;
        check_time_claims(&payload)?;
        Ok(payload)
    }
}

/// Reject `exp`/`nbf` values that are not NumericDates.
///
/// The decoder only enforces these claims when they hold a non-negative
/// integer and silently skips anything else, so the shape is checked here.
/// A negative `exp` lies before the epoch and is reported as expired.
fn check_time_claims(payload: &Map<String, Value>) -> Result<(), AuthFailure> {
    for claim in ["exp", "nbf"] {
        let Some(value) = payload.get(claim) else {
            continue;
        };
        if value.as_u64().is_some() {
            continue;
        }
        if claim == "exp" && value.as_f64().is_some_and(|secs| secs < 0.0) {
            return Err(AuthFailure::Expired);
        }
        return Err(AuthFailure::malformed(format!(
            "`{claim}` is {}, not a NumericDate",
            kind(value)
        )));
    }
    Ok(())
}

/// Decode the first segment without verifying anything.
fn read_header(raw_token: &str) -> Result<UnverifiedHeader, AuthFailure> {
    let segments: Vec<&str> = raw_token.split('.').collect();
    if segments.len() != 3 {
        return Err(AuthFailure::malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let bytes = SEGMENT_ENGINE
        .decode(segments[0])
        .map_err(|e| AuthFailure::malformed(format!("header is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthFailure::malformed(format!("header is not a JSON object: {e}")))
}

/// Pull the application claims out of a verified payload.
///
/// The field may hold a JSON object serialized as a string, or the object
/// itself. Absent and `null` both mean "no claims".
fn extract_claims(payload: &Map<String, Value>, field: &str) -> Result<VerifiedClaims, AuthFailure> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(VerifiedClaims::empty()),
        Some(Value::Object(map)) => Ok(VerifiedClaims::from(map.clone())),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(VerifiedClaims::from(map)),
            Ok(Value::Null) => Ok(VerifiedClaims::empty()),
            Ok(other) => Err(AuthFailure::invalid_payload(format!(
                "`{field}` holds {}, not an object",
                kind(&other)
            ))),
            Err(e) => Err(AuthFailure::invalid_payload(format!(
                "`{field}` is not valid JSON: {e}"
            ))),
        },
        Some(other) => Err(AuthFailure::invalid_payload(format!(
            "`{field}` is {}, not an object",
            kind(other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
