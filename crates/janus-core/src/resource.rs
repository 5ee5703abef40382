//! Resource descriptor parsing.
//!
//! The gateway identifies the operation being authorized with an
//! execute-api ARN:
//!
//! ```text
//! arn:aws:execute-api:{region}:{account}:{api}/{stage}/{method}/{path...}
//! ```
//!
//! [`ResourceDescriptor::parse`] turns that string into typed fields once, at
//! the start of a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

const ARN_PREFIX: &str = "arn";
const EXECUTE_API_SERVICE: &str = "execute-api";

/// Parsed identity of the API operation being authorized.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    partition: String,
    region: String,
    account_id: String,
    api_id: String,
    stage: String,
    http_method: String,
    path: String,
}

impl ResourceDescriptor {
    /// Build a descriptor from its parts in the `aws` partition.
    ///
    /// A leading `/` on `path` is dropped so the descriptor matches what
    /// [`parse`](Self::parse) would produce.
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        api_id: impl Into<String>,
        stage: impl Into<String>,
        http_method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let path = path.strip_prefix('/').map(str::to_string).unwrap_or(path);
        Self {
            partition: "aws".to_string(),
            region: region.into(),
            account_id: account_id.into(),
            api_id: api_id.into(),
            stage: stage.into(),
            http_method: http_method.into(),
            path,
        }
    }

    /// Parse an execute-api method ARN.
    ///
    /// The sixth colon-separated field is split on `/` into api id, stage,
    /// method and the remaining path; colons inside the path are preserved.
    /// The path may be empty (the API root), every other field must not be.
    pub fn parse(arn: &str) -> Result<Self, ResourceError> {
        let fields: Vec<&str> = arn.splitn(6, ':').collect();
        if fields.len() != 6 {
            return Err(ResourceError::new(
                arn,
                format!("expected 6 colon-separated fields, found {}", fields.len()),
            ));
        }

        if fields[0] != ARN_PREFIX {
            return Err(ResourceError::new(arn, "missing `arn` prefix"));
        }
        if fields[2] != EXECUTE_API_SERVICE {
            return Err(ResourceError::new(
                arn,
                format!("unsupported service `{}`", fields[2]),
            ));
        }

        let mut segments = fields[5].splitn(4, '/');
        let api_id = segments.next().unwrap_or_default();
        let stage = segments.next().unwrap_or_default();
        let http_method = segments.next().unwrap_or_default();
        let path = segments.next().unwrap_or_default();

        let required = [
            ("partition", fields[1]),
            ("region", fields[3]),
            ("account id", fields[4]),
            ("api id", api_id),
            ("stage", stage),
            ("method", http_method),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ResourceError::new(arn, format!("missing {name}")));
        }

        Ok(Self {
            partition: fields[1].to_string(),
            region: fields[3].to_string(),
            account_id: fields[4].to_string(),
            api_id: api_id.to_string(),
            stage: stage.to_string(),
            http_method: http_method.to_string(),
            path: path.to_string(),
        })
    }

    /// ARN partition (normally `aws`).
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Region the API is deployed in.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Account that owns the API.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// API identifier.
    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    /// Deployment stage.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// HTTP method of the requested operation.
    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    /// Request path without its leading slash. May be empty.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for ResourceDescriptor {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:execute-api:{}:{}:{}/{}/{}/{}",
            self.partition,
            self.region,
            self.account_id,
            self.api_id,
            self.stage,
            self.http_method,
            self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const METHOD_ARN: &str = "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/GET/users/1";

    #[test]
    fn test_parse_method_arn() {
        let resource = ResourceDescriptor::parse(METHOD_ARN).unwrap();
        assert_eq!(resource.partition(), "aws");
        assert_eq!(resource.region(), "us-east-1");
        assert_eq!(resource.account_id(), "123456789012");
        assert_eq!(resource.api_id(), "abcdef123");
        assert_eq!(resource.stage(), "prod");
        assert_eq!(resource.http_method(), "GET");
        assert_eq!(resource.path(), "users/1");
    }

    #[test]
    fn test_parse_root_path() {
        let resource: ResourceDescriptor = "arn:aws:execute-api:eu-west-1:111122223333:api/dev/POST/"
            .parse()
            .unwrap();
        assert_eq!(resource.http_method(), "POST");
        assert_eq!(resource.path(), "");
    }

    #[test]
    fn test_parse_keeps_colons_in_path() {
        let resource =
            ResourceDescriptor::parse("arn:aws:execute-api:us-east-1:1:api/prod/GET/a:b/c").unwrap();
        assert_eq!(resource.path(), "a:b/c");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = ResourceDescriptor::parse("arn:aws:execute-api:us-east-1").unwrap_err();
        assert!(err.reason.contains("6 colon-separated fields"));
    }

    #[test]
    fn test_parse_missing_stage() {
        let err =
            ResourceDescriptor::parse("arn:aws:execute-api:us-east-1:123456789012:abcdef123").unwrap_err();
        assert_eq!(err.reason, "missing stage");
    }

    #[test]
    fn test_parse_missing_method() {
        let err = ResourceDescriptor::parse("arn:aws:execute-api:us-east-1:123456789012:abc/prod")
            .unwrap_err();
        assert_eq!(err.reason, "missing method");
    }

    #[test]
    fn test_parse_rejects_other_services() {
        let err = ResourceDescriptor::parse("arn:aws:s3:us-east-1:123456789012:bucket/a/b/c")
            .unwrap_err();
        assert!(err.reason.contains("unsupported service"));
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(ResourceDescriptor::parse("urn:aws:execute-api:r:a:api/s/GET/x").is_err());
    }

    #[test]
    fn test_parse_empty_region() {
        let err = ResourceDescriptor::parse("arn:aws:execute-api::123:api/prod/GET/x").unwrap_err();
        assert_eq!(err.reason, "missing region");
    }

    #[test]
    fn test_new_strips_leading_slash() {
        let resource =
            ResourceDescriptor::new("us-east-1", "123456789012", "abcdef123", "prod", "GET", "/users/1");
        assert_eq!(resource.path(), "users/1");
        assert_eq!(resource.to_string(), METHOD_ARN);
    }

    #[test]
    fn test_display_round_trip() {
        let resource = ResourceDescriptor::parse(METHOD_ARN).unwrap();
        assert_eq!(resource.to_string(), METHOD_ARN);
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(input in ".{0,120}") {
            let _ = ResourceDescriptor::parse(&input);
        }

        #[test]
        fn prop_well_formed_arns_parse(
            region in "[a-z]{2}-[a-z]{4,9}-[1-9]",
            account in "[0-9]{12}",
            api in "[a-z0-9]{6,10}",
            stage in "[a-zA-Z0-9_]{1,10}",
            method in "(GET|POST|PUT|PATCH|HEAD|DELETE|OPTION|\\*)",
            path in "[a-zA-Z0-9/._-]{0,40}",
        ) {
            let arn = format!("arn:aws:execute-api:{region}:{account}:{api}/{stage}/{method}/{path}");
            let resource = ResourceDescriptor::parse(&arn).unwrap();
            prop_assert_eq!(resource.region(), region.as_str());
            prop_assert_eq!(resource.account_id(), account.as_str());
            prop_assert_eq!(resource.api_id(), api.as_str());
            prop_assert_eq!(resource.stage(), stage.as_str());
            prop_assert_eq!(resource.http_method(), method.as_str());
            prop_assert_eq!(resource.path(), path.as_str());
            prop_assert_eq!(resource.to_string(), arn);
        }
    }
}
