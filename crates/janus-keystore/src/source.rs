//! Backing store abstraction.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::error::KeyStoreResult;

/// Read interface to the shared store the key publisher writes to.
///
/// The store holds a set of known key identifiers and, per identifier, a map
/// of JWK fields. Janus never writes to it.
///
/// Implementations must allow concurrent calls from independent requests
/// and must not retry internally; a failed call is reported immediately.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// All key identifiers currently published.
    async fn key_ids(&self) -> KeyStoreResult<HashSet<String>>;

    /// Stored fields for one key.
    ///
    /// Returns `Ok(None)` when nothing is stored under the identifier.
    async fn key_fields(&self, key_id: &str) -> KeyStoreResult<Option<HashMap<String, String>>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> KeyStoreResult<()>;
}
