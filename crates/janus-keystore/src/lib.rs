//! # Janus Key Store
//!
//! Resolves the RSA public keys that Janus trusts for token verification.
//!
//! Keys are published by an external key manager into a shared store, one
//! identifier set plus one field map per key. This crate only reads them:
//! every lookup goes to the store, so a rotation is honoured on the next
//! request without restarting anything.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use janus_keystore::{rsa_key_fields, KeyStore, MemoryKeySource};
//!
//! # tokio_test::block_on(async {
//! let source = Arc::new(MemoryKeySource::new());
//! let store = KeyStore::new(source.clone());
//!
//! assert!(store.lookup("key-1").await?.is_none());
//! # Ok::<(), janus_keystore::KeyStoreError>(())
//! # }).unwrap();
//! ```

mod error;
mod key;
mod memory;
mod redis_source;
mod source;
mod store;

pub use error::{KeyParseError, KeyStoreError, KeyStoreResult};
pub use key::{rsa_key_fields, SigningKey, SUPPORTED_ALGORITHMS};
pub use memory::MemoryKeySource;
pub use redis_source::{RedisKeySource, DEFAULT_KEY_SET};
pub use source::KeySource;
pub use store::KeyStore;
