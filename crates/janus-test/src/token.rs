//! Token minting.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{Algorithm, Header};
use serde_json::{json, Map, Value};

use crate::keys::TestKey;

/// Claim carrying the serialized client parameters.
pub const CLAIMS_FIELD: &str = "clientParams";

/// Client parameters most tests use.
pub fn sample_claims() -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert("tenant".to_string(), json!("acme"));
    claims.insert("scope".to_string(), json!("orders:read"));
    claims
}

/// Build client parameters from string pairs.
pub fn claims_from<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// Token payload with `claims` serialized into [`CLAIMS_FIELD`], valid for an hour.
pub fn payload_with(claims: &Map<String, Value>) -> Value {
    let now = Utc::now().timestamp();
    let mut payload = json!({
        "sub": "client:test",
        "iat": now,
        "exp": now + 3600,
    });
    payload[CLAIMS_FIELD] = Value::String(Value::Object(claims.clone()).to_string());
    payload
}

/// Mint an RS256 token signed by `key` carrying `claims`.
pub fn mint_token(key: &TestKey, claims: &Map<String, Value>) -> String {
    mint_token_with_payload(key, &payload_with(claims))
}

/// Mint an RS256 token signed by `key` with an arbitrary payload.
pub fn mint_token_with_payload(key: &TestKey, payload: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(key.kid.to_string());
    mint_token_with_header(&header, key, payload)
}

/// Mint a token with a caller-supplied header, signed by `key`.
///
/// # Panics
///
/// Panics if the header algorithm does not fit an RSA key.
pub fn mint_token_with_header(header: &Header, key: &TestKey, payload: &Value) -> String {
    jsonwebtoken::encode(header, payload, &key.encoding_key()).expect("failed to encode test JWT")
}

/// A token whose `exp` passed an hour ago.
pub fn expired_token(key: &TestKey, claims: &Map<String, Value>) -> String {
    let mut payload = payload_with(claims);
    payload["exp"] = json!(Utc::now().timestamp() - 3600);
    mint_token_with_payload(key, &payload)
}

/// A token whose `nbf` is an hour away.
pub fn not_yet_valid_token(key: &TestKey, claims: &Map<String, Value>) -> String {
    let mut payload = payload_with(claims);
    payload["nbf"] = json!(Utc::now().timestamp() + 3600);
    mint_token_with_payload(key, &payload)
}

/// Unsigned `{header}.{payload}.` string for rejection tests.
pub fn craft_raw_jwt(header: &Value, payload: &Value) -> String {
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header_b64}.{payload_b64}.")
}
