//! In-memory key source for tests and local development.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{KeyStoreError, KeyStoreResult};
use crate::source::KeySource;

/// A [`KeySource`] held in process memory.
///
/// Mirrors the Redis layout: a set of published identifiers plus a field
/// map per identifier. The two can be edited independently, so tests can
/// publish an identifier whose material is missing. Outages are simulated
/// with [`set_available`](Self::set_available).
#[derive(Debug)]
pub struct MemoryKeySource {
    members: RwLock<HashSet<String>>,
    keys: RwLock<HashMap<String, HashMap<String, String>>>,
    available: AtomicBool,
}

impl Default for MemoryKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKeySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashSet::new()),
            keys: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Publish a key: list its identifier and store its fields.
    pub fn insert_key(&self, key_id: impl Into<String>, fields: HashMap<String, String>) {
        let key_id = key_id.into();
        self.keys.write().insert(key_id.clone(), fields);
        self.members.write().insert(key_id);
    }

    /// List an identifier without storing any fields for it.
    pub fn insert_member(&self, key_id: impl Into<String>) {
        self.members.write().insert(key_id.into());
    }

    /// Unpublish a key and drop its fields.
    pub fn remove_key(&self, key_id: &str) {
        self.members.write().remove(key_id);
        self.keys.write().remove(key_id);
    }

    /// Simulate the store going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> KeyStoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(KeyStoreError::unavailable("in-memory key source is offline"))
        }
    }
}

#[async_trait]
impl KeySource for MemoryKeySource {
    async fn key_ids(&self) -> KeyStoreResult<HashSet<String>> {
        self.ensure_available()?;
        Ok(self.members.read().clone())
    }

    async fn key_fields(&self, key_id: &str) -> KeyStoreResult<Option<HashMap<String, String>>> {
        self.ensure_available()?;
        Ok(self.keys.read().get(key_id).cloned())
    }

    async fn ping(&self) -> KeyStoreResult<()> {
        self.ensure_available()
    }
}
