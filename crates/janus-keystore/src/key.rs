//! Signing keys and their stored representation.
//!
//! Each key lives in the backing store as a flat map of JWK fields:
//!
//! | Field | Required | Meaning |
//! |-------|----------|---------|
//! | `n`   | yes      | RSA modulus, base64url |
//! | `e`   | yes      | RSA public exponent, base64url |
//! | `kty` | no       | Key type, must be `RSA` |
//! | `kid` | no       | Key identifier, must match the set member |
//! | `alg` | no       | `RS256` (default), `RS384` or `RS512` |
//! | `use` | no       | Must be `sig` |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey};

use crate::error::KeyParseError;

/// Algorithms a stored RSA key may declare.
pub const SUPPORTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// A trusted RSA public key, identified by its key id.
///
/// Immutable once resolved. Rotation replaces keys, it never edits them.
#[derive(Clone)]
pub struct SigningKey {
    key_id: String,
    algorithm: Algorithm,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Reconstruct a key from its stored JWK fields.
    ///
    /// `key_id` is the identifier the key was listed under.
    pub fn from_fields(
        key_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<Self, KeyParseError> {
        if let Some(kty) = fields.get("kty") {
            if kty != "RSA" {
                return Err(KeyParseError::new(key_id, format!("unsupported key type `{kty}`")));
            }
        }
        if let Some(usage) = fields.get("use") {
            if usage != "sig" {
                return Err(KeyParseError::new(key_id, format!("key use is `{usage}`, not `sig`")));
            }
        }
        if let Some(stored_kid) = fields.get("kid") {
            if stored_kid != key_id {
                return Err(KeyParseError::new(
                    key_id,
                    format!("stored kid `{stored_kid}` does not match"),
                ));
            }
        }

        let algorithm = match fields.get("alg") {
            Some(alg) => Algorithm::from_str(alg)
                .ok()
                .filter(|alg| SUPPORTED_ALGORITHMS.contains(alg))
                .ok_or_else(|| KeyParseError::new(key_id, format!("unsupported algorithm `{alg}`")))?,
            None => Algorithm::RS256,
        };

        let modulus = required(fields, key_id, "n", "modulus")?;
        let exponent = required(fields, key_id, "e", "exponent")?;
        let decoding_key = DecodingKey::from_rsa_components(modulus, exponent)
            .map_err(|e| KeyParseError::new(key_id, format!("bad RSA components: {e}")))?;

        Ok(Self {
            key_id: key_id.to_string(),
            algorithm,
            decoding_key,
        })
    }

    /// Key identifier.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Signature algorithm tokens verified by this key must use.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Key material for signature verification.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_id", &self.key_id)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    key_id: &str,
    field: &str,
    name: &str,
) -> Result<&'a str, KeyParseError> {
    fields
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| KeyParseError::new(key_id, format!("missing {name} `{field}`")))
}

/// Build the stored field map for an RS256 signing key.
///
/// This is the shape the key publisher writes and [`SigningKey::from_fields`]
/// reads back.
pub fn rsa_key_fields(key_id: &str, modulus: &str, exponent: &str) -> HashMap<String, String> {
    HashMap::from([
        ("kty".to_string(), "RSA".to_string()),
        ("kid".to_string(), key_id.to_string()),
        ("n".to_string(), modulus.to_string()),
        ("e".to_string(), exponent.to_string()),
        ("alg".to_string(), "RS256".to_string()),
        ("use".to_string(), "sig".to_string()),
    ])
}
