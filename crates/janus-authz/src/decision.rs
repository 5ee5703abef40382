//! The decision returned to the gateway.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use janus_core::VerifiedClaims;
use janus_policy::{Effect, PolicyDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Context passed through to the gateway's backend integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Verified claims as standard base64 of their compact JSON.
    pub claims: String,
}

/// An authorization decision: who, what they may do, and their claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Principal the policy applies to.
    pub principal_id: String,
    /// Allow or deny statements for the requested API stage.
    pub policy_document: PolicyDocument,
    /// Claims for downstream use.
    pub context: DecisionContext,
}

/// The context claims of a [`Decision`] could not be read back.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClaimsDecodeError {
    /// Not standard base64.
    #[error("claims are not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Not a JSON object.
    #[error("claims are not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

impl Decision {
    /// Combine a policy with the claims it was decided on.
    pub fn new(
        principal_id: impl Into<String>,
        policy_document: PolicyDocument,
        claims: &VerifiedClaims,
    ) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(claims)?;
        Ok(Self {
            principal_id: principal_id.into(),
            policy_document,
            context: DecisionContext {
                claims: STANDARD.encode(json),
            },
        })
    }

    /// Check whether the policy allows anything.
    pub fn is_allow(&self) -> bool {
        self.policy_document.allows_anything()
    }

    /// The effect of the decision as a whole.
    pub fn effect(&self) -> Effect {
        if self.is_allow() {
            Effect::Allow
        } else {
            Effect::Deny
        }
    }

    /// Decode the context claims the way the gateway backend would.
    pub fn decoded_claims(&self) -> Result<VerifiedClaims, ClaimsDecodeError> {
        let json = STANDARD.decode(&self.context.claims)?;
        Ok(serde_json::from_slice(&json)?)
    }
}
