//! Seeded key stores and resources.

use std::sync::Arc;

use janus_core::ResourceDescriptor;
use janus_keystore::{KeyStore, MemoryKeySource};

use crate::keys::{KEY_A, KEY_B};

/// The resource ARN used throughout the test suites.
pub const RESOURCE_ARN: &str = "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/GET/users/1";

/// In-memory source publishing [`KEY_A`] and [`KEY_B`].
pub fn seeded_source() -> Arc<MemoryKeySource> {
    let source = Arc::new(MemoryKeySource::new());
    source.insert_key(KEY_A.kid, KEY_A.fields());
    source.insert_key(KEY_B.kid, KEY_B.fields());
    source
}

/// Key store over a fresh [`seeded_source`].
///
/// Use [`seeded_source`] directly when the test needs to rotate keys or
/// take the source offline.
pub fn seeded_store() -> KeyStore {
    KeyStore::new(seeded_source())
}

/// [`RESOURCE_ARN`] parsed.
///
/// # Panics
///
/// Never in practice; the constant is well formed.
pub fn sample_resource() -> ResourceDescriptor {
    RESOURCE_ARN.parse().expect("sample ARN parses")
}
