//! # Janus Test
//!
//! Fixtures shared by the Janus test suites: two fixed RSA key pairs, token
//! minting helpers, and key stores seeded with the public halves.
//!
//! ## Example
//!
//! ```
//! use janus_test::{mint_token, sample_claims, KEY_A};
//!
//! let token = mint_token(&KEY_A, &sample_claims());
//! assert_eq!(token.split('.').count(), 3);
//! ```

#![doc(html_root_url = "https://docs.rs/janus-test/0.1.0")]

mod keys;
mod store;
mod token;

pub use keys::{TestKey, KEY_A, KEY_B};
pub use store::{sample_resource, seeded_source, seeded_store, RESOURCE_ARN};
pub use token::{
    claims_from, craft_raw_jwt, expired_token, mint_token, mint_token_with_header,
    mint_token_with_payload, not_yet_valid_token, payload_with, sample_claims, CLAIMS_FIELD,
};
