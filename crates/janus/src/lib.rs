//! # Janus
//!
//! **Bearer-token authorizer for API Gateway**
//!
//! Janus turns a bearer token and the ARN of the invoked method into an IAM
//! policy decision:
//!
//! - **Key resolution** – signing keys are read from a shared store on every
//!   request, so rotations apply immediately
//! - **Token verification** – RSA signature, `exp` and `nbf` are checked and
//!   the application claims extracted
//! - **Policy construction** – an allow-all or deny-all policy scoped to the
//!   API stage, with the verified claims attached as context
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use janus::prelude::*;
//!
//! let source = RedisKeySource::connect("127.0.0.1", 6379, 0, DEFAULT_KEY_SET).await?;
//! let inspector = TokenInspector::new(KeyStore::new(Arc::new(source)), InspectorConfig::default());
//! let authorizer = Authorizer::new(inspector, AuthorizerConfig::default());
//!
//! let decision = authorizer.decide(token, method_arn).await?;
//! ```
//!
//! ## Flow
//!
//! ```text
//! token ─► TokenInspector ─► KeyStore ─► KeySource (Redis)
//!              │
//!              ▼ claims
//! ARN ──► PolicyBuilder ─► PolicyDocument ─► Decision
//! ```

#![forbid(unsafe_code)]

// Shared data model
pub use janus_core as core;

// Signing key resolution
pub use janus_keystore as keystore;

// Token verification
pub use janus_token as token;

// Policy documents
pub use janus_policy as policy;

// Decisions
pub use janus_authz as authz;

// Configuration
pub use janus_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use janus::prelude::*;
///
/// let resource: ResourceDescriptor =
///     "arn:aws:execute-api:us-east-1:123456789012:abc/prod/GET/pets".parse().unwrap();
/// let policy = PolicyDocument::deny_all(&resource).unwrap();
/// assert!(!policy.allows_anything());
/// ```
pub mod prelude {
    pub use janus_authz::{Authorizer, AuthorizerConfig, Decision, DecisionError, DecisionResult};
    pub use janus_config::{ConfigLoader, JanusConfig};
    pub use janus_core::{AuthFailure, ResourceDescriptor, ResourceError, VerifiedClaims};
    pub use janus_keystore::{
        KeySource, KeyStore, KeyStoreError, MemoryKeySource, RedisKeySource, SigningKey,
        DEFAULT_KEY_SET,
    };
    pub use janus_policy::{Effect, HttpMethod, PolicyBuilder, PolicyDocument, PolicyError};
    pub use janus_token::{InspectorConfig, TokenInspector, VerifyError};
}
