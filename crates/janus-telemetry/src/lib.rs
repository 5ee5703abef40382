//! Observability for Janus.
//!
//! - **Logging**: structured JSON (or pretty) output through
//!   `tracing-subscriber`, filtered by an `EnvFilter` directive
//! - **Metrics**: a process-wide Prometheus recorder, rendered by the
//!   server's `/_janus/metrics` endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use janus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("janus")
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, record_request, render_metrics, InFlightGuard, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
