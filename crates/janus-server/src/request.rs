//! Body of `POST /authorize`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event type API Gateway sends to TOKEN authorizers.
pub const TOKEN_EVENT_TYPE: &str = "TOKEN";

/// A request for a decision.
///
/// Two shapes are accepted:
///
/// ```json
/// {"token": "eyJ...", "resourceArn": "arn:aws:execute-api:..."}
/// {"type": "TOKEN", "authorizationToken": "Bearer eyJ...", "methodArn": "arn:aws:execute-api:..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    /// Raw bearer token, possibly `Bearer `-prefixed.
    #[serde(alias = "authorizationToken")]
    pub token: String,

    /// Method ARN of the invoked resource.
    #[serde(alias = "methodArn")]
    pub resource_arn: String,

    /// Gateway event type, when the body is a gateway event.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

/// The body of an authorize request was rejected.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Not JSON, or a required field is missing.
    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    /// A gateway event other than TOKEN.
    #[error("unsupported event type `{0}`")]
    UnsupportedEventType(String),
}

impl AuthorizeRequest {
    /// Create a request in the plain shape.
    pub fn new(token: impl Into<String>, resource_arn: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            resource_arn: resource_arn.into(),
            event_type: None,
        }
    }

    /// Parse and check a request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let request: Self = serde_json::from_slice(body)?;
        match request.event_type.as_deref() {
            None | Some(TOKEN_EVENT_TYPE) => Ok(request),
            Some(other) => Err(RequestError::UnsupportedEventType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_shape() {
        let body = br#"{"token": "abc", "resourceArn": "arn:aws:execute-api:r:a:api/s/GET/x"}"#;
        let request = AuthorizeRequest::from_slice(body).unwrap();
        assert_eq!(
            request,
            AuthorizeRequest::new("abc", "arn:aws:execute-api:r:a:api/s/GET/x")
        );
    }

    #[test]
    fn test_gateway_event_shape() {
        let body = br#"{
            "type": "TOKEN",
            "authorizationToken": "Bearer abc",
            "methodArn": "arn:aws:execute-api:r:a:api/s/GET/x"
        }"#;
        let request = AuthorizeRequest::from_slice(body).unwrap();
        assert_eq!(request.token, "Bearer abc");
        assert_eq!(request.event_type.as_deref(), Some("TOKEN"));
    }

    #[test]
    fn test_request_event_type_rejected() {
        let body = br#"{"type": "REQUEST", "authorizationToken": "a", "methodArn": "b"}"#;
        let err = AuthorizeRequest::from_slice(body).unwrap_err();
        assert!(matches!(err, RequestError::UnsupportedEventType(t) if t == "REQUEST"));
    }

    #[test]
    fn test_missing_field() {
        let err = AuthorizeRequest::from_slice(br#"{"token": "abc"}"#).unwrap_err();
        assert!(err.to_string().contains("resourceArn"));
    }

    #[test]
    fn test_not_json() {
        assert!(AuthorizeRequest::from_slice(b"token=abc").is_err());
    }
}
