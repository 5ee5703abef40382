//! Verified application claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application-defined claims taken from a token whose signature and time
/// claims have been verified.
///
/// An empty set is meaningful: the caller presented a valid token that
/// carries no application payload. The authorizer turns that into a deny
/// decision, which is different from rejecting the token outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiedClaims(Map<String, Value>);

impl VerifiedClaims {
    /// An empty claim set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no claims are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level claims.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a claim by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate over claims.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for VerifiedClaims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for VerifiedClaims {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
