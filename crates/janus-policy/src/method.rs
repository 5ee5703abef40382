//! HTTP verbs a statement may name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// A verb in a statement's resource ARN.
///
/// Matching is exact and case sensitive. `OPTION` is spelled the way API
/// Gateway method ARNs spell it in the deployments this authorizer fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// `GET`
    #[serde(rename = "GET")]
    Get,
    /// `POST`
    #[serde(rename = "POST")]
    Post,
    /// `PUT`
    #[serde(rename = "PUT")]
    Put,
    /// `PATCH`
    #[serde(rename = "PATCH")]
    Patch,
    /// `HEAD`
    #[serde(rename = "HEAD")]
    Head,
    /// `DELETE`
    #[serde(rename = "DELETE")]
    Delete,
    /// `OPTION`
    #[serde(rename = "OPTION")]
    Option,
    /// `*`, every verb.
    #[serde(rename = "*")]
    All,
}

impl HttpMethod {
    /// Every accepted verb.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Head,
        Self::Delete,
        Self::Option,
        Self::All,
    ];

    /// The verb as it appears in an ARN.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Option => "OPTION",
            Self::All => "*",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| PolicyError::invalid_method(s))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_verbs() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_verbs() {
        for verb in ["TRACE", "CONNECT", "OPTIONS", "get", ""] {
            assert_eq!(
                verb.parse::<HttpMethod>(),
                Err(PolicyError::invalid_method(verb))
            );
        }
    }

    proptest! {
        #[test]
        fn prop_parse_accepts_only_listed_verbs(verb in "[A-Z*]{0,8}") {
            let listed = HttpMethod::ALL.iter().any(|m| m.as_str() == verb);
            prop_assert_eq!(verb.parse::<HttpMethod>().is_ok(), listed);
        }
    }
}
