//! # Janus Token
//!
//! Verifies RSA-signed bearer tokens for the Janus authorizer.
//!
//! [`TokenInspector::verify`] reads the key id from the unverified header,
//! resolves the key through a [`KeyStore`](janus_keystore::KeyStore), checks
//! the signature and time claims, and returns the application claims carried
//! in the payload.
//!
//! Failures come in two kinds, kept apart by [`VerifyError`]: a rejected
//! token ([`AuthFailure`](janus_core::AuthFailure)) and an unreachable key
//! store.

mod config;
mod error;
mod inspector;

pub use config::{InspectorConfig, DEFAULT_CLAIMS_FIELD, MAX_LEEWAY_SECS};
pub use error::{VerifyError, VerifyResult};
pub use inspector::TokenInspector;
