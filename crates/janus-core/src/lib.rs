//! # Janus Core
//!
//! Core data model for the Janus authorizer.
//!
//! This crate provides the types shared by every stage of an authorization
//! decision:
//!
//! - [`ResourceDescriptor`] - Parsed identity of the API operation being authorized
//! - [`VerifiedClaims`] - Application claims extracted from a verified token
//! - [`AuthFailure`] - Why a token could not be accepted
//!
//! # Example
//!
//! ```
//! use janus_core::ResourceDescriptor;
//!
//! let resource: ResourceDescriptor =
//!     "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/GET/users/1".parse()?;
//!
//! assert_eq!(resource.stage(), "prod");
//! assert_eq!(resource.path(), "users/1");
//! # Ok::<(), janus_core::ResourceError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/janus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod claims;
mod error;
mod resource;

pub use claims::VerifiedClaims;
pub use error::{AuthFailure, ResourceError};
pub use resource::ResourceDescriptor;
