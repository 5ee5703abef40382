//! # Janus Authz
//!
//! The decision point of the Janus API Gateway authorizer.
//!
//! [`Authorizer::decide`] takes a bearer token and the ARN of the method
//! being called and returns a [`Decision`]: a policy document for the
//! gateway plus the verified claims for the backend.
//!
//! # Overview
//!
//! ```text
//!   token, methodArn
//!          │
//!   ┌──────▼──────────┐   parse ARN    ┌────────────────────┐
//!   │   Authorizer    │───────────────▶│ ResourceDescriptor │
//!   └──────┬──────────┘                └────────────────────┘
//!          │ verify
//!   ┌──────▼──────────┐   lookup kid   ┌────────────────────┐
//!   │ TokenInspector  │───────────────▶│     KeyStore       │
//!   └──────┬──────────┘                └────────────────────┘
//!          │ claims
//!   ┌──────▼──────────┐
//!   │  PolicyBuilder  │  claims present → allow all
//!   └──────┬──────────┘  claims empty   → deny all
//!          ▼
//!       Decision
//! ```
//!
//! A token that fails verification yields [`DecisionError::Unauthorized`],
//! never a deny policy. A deny policy is only produced for a valid token
//! that carries no claims.
//!
//! # Example
//!
//! ```ignore
//! use janus_authz::{Authorizer, AuthorizerConfig};
//! use janus_keystore::{KeyStore, RedisKeySource};
//! use janus_token::{InspectorConfig, TokenInspector};
//!
//! let source = RedisKeySource::connect("127.0.0.1", 6379, 0, "publicKey").await?;
//! let inspector = TokenInspector::new(KeyStore::new(Arc::new(source)), InspectorConfig::default());
//! let authorizer = Authorizer::new(inspector, AuthorizerConfig::default());
//!
//! let decision = authorizer.decide(token, method_arn).await?;
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod metrics;

use std::time::Instant;

use janus_core::ResourceDescriptor;
use janus_policy::PolicyDocument;
use janus_token::TokenInspector;
use tracing::{error, info, instrument, warn};

pub use config::AuthorizerConfig;
pub use decision::{ClaimsDecodeError, Decision, DecisionContext};
pub use error::{DecisionError, DecisionResult};

/// Turns a bearer token and a method ARN into a [`Decision`].
///
/// Stateless between calls; share one instance across requests.
#[derive(Debug, Clone)]
pub struct Authorizer {
    inspector: TokenInspector,
    config: AuthorizerConfig,
}

impl Authorizer {
    /// Create an authorizer verifying tokens with `inspector`.
    pub fn new(inspector: TokenInspector, config: AuthorizerConfig) -> Self {
        Self { inspector, config }
    }

    /// The token inspector in use.
    pub fn inspector(&self) -> &TokenInspector {
        &self.inspector
    }

    /// Current configuration.
    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// Decide on a request.
    ///
    /// `raw_token` may carry a `Bearer ` prefix. A verified token with claims
    /// gets an allow-all policy for the API stage, one without claims gets a
    /// deny-all policy.
    ///
    /// # Errors
    ///
    /// See [`DecisionError`]. Every failure is final for this request
    /// except [`DecisionError::KeyStoreUnavailable`].
    #[instrument(
        name = "decide",
        skip(self, raw_token),
        fields(outcome = tracing::field::Empty)
    )]
    pub async fn decide(&self, raw_token: &str, resource_arn: &str) -> DecisionResult<Decision> {
        let started = Instant::now();
        let result = self.evaluate(raw_token, resource_arn).await;

        let outcome = match &result {
            Ok(decision) if decision.is_allow() => "allow",
            Ok(_) => "deny",
            Err(e) => e.category(),
        };
        tracing::Span::current().record("outcome", outcome);
        metrics::record_decision(outcome, started.elapsed());

        match &result {
            Ok(_) => info!(outcome, "authorization decided"),
            Err(DecisionError::Unauthorized(failure)) => {
                info!(outcome, reason = failure.reason(), error = %failure, "token rejected");
            }
            Err(e @ DecisionError::KeyStoreUnavailable(_)) => {
                warn!(outcome, error = %e, "key store unavailable");
            }
            Err(e) => error!(outcome, error = %e, "no decision produced"),
        }

        result
    }

    async fn evaluate(&self, raw_token: &str, resource_arn: &str) -> DecisionResult<Decision> {
        let resource = ResourceDescriptor::parse(resource_arn)?;
        let claims = self
            .inspector
            .verify(strip_bearer(raw_token), &resource)
            .await?;

        let policy = if claims.is_empty() {
            PolicyDocument::deny_all(&resource)?
        } else {
            PolicyDocument::allow_all(&resource)?
        };

        Ok(Decision::new(
            self.config.principal_id.clone(),
            policy,
            &claims,
        )?)
    }
}

/// Drop a case-insensitive `Bearer ` scheme prefix, if present.
fn strip_bearer(raw_token: &str) -> &str {
    let trimmed = raw_token.trim();
    match trimmed.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim_start(),
        _ => trimmed,
    }
}
