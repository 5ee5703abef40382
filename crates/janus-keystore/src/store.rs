//! Read-through key resolution.

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::error::KeyStoreResult;
use crate::key::SigningKey;
use crate::source::KeySource;

const LOOKUPS_METRIC: &str = "janus_key_lookups_total";

/// Resolves trusted signing keys from a [`KeySource`].
///
/// Nothing is cached: the source is consulted on every call, so a rotation
/// is visible to the very next request. Cloning is cheap and clones share
/// the same source.
#[derive(Clone)]
pub struct KeyStore {
    source: Arc<dyn KeySource>,
}

impl KeyStore {
    /// Create a store over the given source.
    pub fn new(source: Arc<dyn KeySource>) -> Self {
        Self { source }
    }

    /// Find the key published under `key_id`.
    ///
    /// Returns `Ok(None)` if the identifier is not published, or if its
    /// stored material is missing or cannot be parsed. Only a failure to
    /// reach the source is an error.
    pub async fn lookup(&self, key_id: &str) -> KeyStoreResult<Option<SigningKey>> {
        let ids = self.source.key_ids().await.inspect_err(|_| {
            counter!(LOOKUPS_METRIC, "result" => "unavailable").increment(1);
        })?;

        if !ids.contains(key_id) {
            debug!(kid = key_id, published = ids.len(), "key id not published");
            counter!(LOOKUPS_METRIC, "result" => "not_found").increment(1);
            return Ok(None);
        }

        let key = self.resolve(key_id).await.inspect_err(|_| {
            counter!(LOOKUPS_METRIC, "result" => "unavailable").increment(1);
        })?;

        let result = if key.is_some() { "hit" } else { "unparseable" };
        counter!(LOOKUPS_METRIC, "result" => result).increment(1);
        Ok(key)
    }

    /// Resolve every published key, skipping any whose material is unusable.
    pub async fn resolve_all(&self) -> KeyStoreResult<Vec<SigningKey>> {
        let ids = self.source.key_ids().await?;
        let mut keys = Vec::with_capacity(ids.len());
        for key_id in &ids {
            if let Some(key) = self.resolve(key_id).await? {
                keys.push(key);
            }
        }
        keys.sort_by(|a, b| a.key_id().cmp(b.key_id()));
        Ok(keys)
    }

    /// Check that the backing source is reachable.
    pub async fn ping(&self) -> KeyStoreResult<()> {
        self.source.ping().await
    }

    async fn resolve(&self, key_id: &str) -> KeyStoreResult<Option<SigningKey>> {
        let Some(fields) = self.source.key_fields(key_id).await? else {
            warn!(kid = key_id, "key id published without key material");
            return Ok(None);
        };

        match SigningKey::from_fields(key_id, &fields) {
            Ok(key) => Ok(Some(key)),
            Err(e) => {
                warn!(kid = key_id, error = %e, "ignoring unusable signing key");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore").finish_non_exhaustive()
    }
}
