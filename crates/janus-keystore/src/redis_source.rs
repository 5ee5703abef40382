//! Redis-backed key source.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::error::KeyStoreResult;
use crate::source::KeySource;

/// Default name of the Redis set holding published key identifiers.
pub const DEFAULT_KEY_SET: &str = "publicKey";

/// A [`KeySource`] reading the key publisher's Redis layout.
///
/// `SMEMBERS {key_set}` lists identifiers and `HGETALL {key_set}:{kid}`
/// returns each key's fields. The multiplexed connection is cloned per call,
/// so concurrent requests share one socket without locking.
#[derive(Clone)]
pub struct RedisKeySource {
    connection: MultiplexedConnection,
    key_set: String,
}

impl RedisKeySource {
    /// Connect to Redis at `host:port`, selecting `database`.
    ///
    /// The connection is owned by the returned handle; the caller decides
    /// when to build it and when to drop it.
    pub async fn connect(
        host: &str,
        port: u16,
        database: i64,
        key_set: impl Into<String>,
    ) -> KeyStoreResult<Self> {
        let url = format!("redis://{host}:{port}/{database}");
        Self::connect_url(&url, key_set).await
    }

    /// Connect using a full `redis://` URL.
    pub async fn connect_url(url: &str, key_set: impl Into<String>) -> KeyStoreResult<Self> {
        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        let key_set = key_set.into();
        info!(key_set = %key_set, "connected to redis key store");
        Ok(Self {
            connection,
            key_set,
        })
    }

    /// Name of the identifier set.
    pub fn key_set(&self) -> &str {
        &self.key_set
    }

    fn fields_key(&self, key_id: &str) -> String {
        format!("{}:{}", self.key_set, key_id)
    }
}

impl fmt::Debug for RedisKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisKeySource")
            .field("key_set", &self.key_set)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KeySource for RedisKeySource {
    async fn key_ids(&self) -> KeyStoreResult<HashSet<String>> {
        let mut conn = self.connection.clone();
        let ids: HashSet<String> = conn.smembers(&self.key_set).await?;
        debug!(count = ids.len(), "listed signing key ids");
        Ok(ids)
    }

    async fn key_fields(&self, key_id: &str) -> KeyStoreResult<Option<HashMap<String, String>>> {
        let mut conn = self.connection.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.fields_key(key_id)).await?;
        // HGETALL on a missing key answers with an empty map.
        Ok(if fields.is_empty() { None } else { Some(fields) })
    }

    async fn ping(&self) -> KeyStoreResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
