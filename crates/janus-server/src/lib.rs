//! Janus HTTP entry point.
//!
//! Serves authorization decisions over HTTP/1 for callers that cannot link
//! the decision engine directly, such as a gateway custom authorizer shim.
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | POST | `/authorize` | `200` decision, `401` refused token, `400` bad body or ARN, `500` policy defect, `503` key store down |
//! | GET | `/_janus/health` | liveness |
//! | GET | `/_janus/ready` | `200` once listening with a reachable key store |
//! | GET | `/_janus/metrics` | Prometheus text |
//! | GET | `/_janus/version` | build version |
//!
//! # Example Usage
//!
//! ```bash
//! $ janus --config /etc/janus/janus.toml
//!
//! $ JANUS__KEY_STORE__HOST=redis.internal janus
//! ```

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod health;
pub mod request;
pub mod server;

pub use bootstrap::{build_authorizer, connect_key_store, telemetry_config};
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use health::{HealthChecker, HealthStatus, ReadinessStatus};
pub use request::{AuthorizeRequest, RequestError};
pub use server::{handle_request, AppState, JanusServer, REQUEST_ID_HEADER};

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
