//! Typed configuration for Janus.
//!
//! Configuration is layered: built-in defaults, then an optional TOML or
//! JSON file, then environment variables. Unknown fields are rejected.
//!
//! # Example
//!
//! ```no_run
//! use janus_config::ConfigLoader;
//!
//! # fn main() -> Result<(), janus_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("janus.toml")?
//!     .with_env_prefix("JANUS")
//!     .load()?;
//!
//! println!("key store at {}", config.key_store.url());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [key_store]
//! host = "127.0.0.1"
//! port = 6379
//! database = 0
//! key_set = "publicKey"
//!
//! [token]
//! claims_field = "clientParams"
//! leeway_secs = 0
//!
//! [authorizer]
//! principal_id = "janus"
//!
//! [server]
//! http_addr = "0.0.0.0:8080"
//! shutdown_timeout_secs = 30
//! max_body_bytes = 65536
//!
//! [telemetry]
//! service_name = "janus"
//!
//! [telemetry.metrics]
//! enabled = true
//!
//! [telemetry.logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Variables use the format `PREFIX__SECTION__KEY`, for example
//! `JANUS__KEY_STORE__HOST=redis.internal` or
//! `JANUS__TELEMETRY__LOGGING__LEVEL=debug`. `REDISHOST` and `REDISPORT`
//! are read as a fallback for the key store address.

mod config;
mod error;
mod loader;
mod schema;

pub use config::{JanusConfig, JanusConfigBuilder, MAX_TOKEN_LEEWAY_SECS};
pub use error::ConfigError;
pub use loader::{ConfigLoader, LEGACY_HOST_VAR, LEGACY_PORT_VAR};
pub use schema::*;
