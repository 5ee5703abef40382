//! # Janus Policy
//!
//! Builds the API Gateway policy documents an authorizer returns.
//!
//! A [`PolicyBuilder`] collects allow and deny entries for one API stage,
//! validating each method and path, then assembles them into a
//! [`PolicyDocument`]:
//!
//! ```json
//! {
//!   "Version": "2012-10-17",
//!   "Statement": [
//!     {
//!       "Action": "execute-api:Invoke",
//!       "Effect": "Allow",
//!       "Resource": "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/*/*"
//!     }
//!   ]
//! }
//! ```
//!
//! Unconditional entries collapse into one statement per effect; entries
//! with conditions each keep a statement of their own. A document with no
//! statements at all is refused with [`PolicyError::EmptyPolicy`].

mod builder;
mod document;
mod error;
mod method;
mod statement;

pub use builder::{PolicyBuilder, PATH_PATTERN};
pub use document::{PolicyDocument, POLICY_VERSION};
pub use error::{PolicyError, PolicyResult};
pub use method::HttpMethod;
pub use statement::{Condition, Effect, Statement, INVOKE_ACTION};
