//! Policy statements.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only action an API Gateway authorizer policy grants or denies.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Whether a statement grants or refuses access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Grant.
    Allow,
    /// Refuse.
    Deny,
}

impl Effect {
    /// The effect as it is serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition block qualifying a statement, e.g.
/// `{"IpAddress": {"aws:SourceIp": "10.0.0.0/8"}}`.
///
/// Janus does not interpret conditions; they are passed to the gateway
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(Map<String, Value>);

impl Condition {
    /// A single-operator condition testing one key.
    pub fn new(operator: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut test = Map::new();
        test.insert(key.into(), value.into());
        let mut block = Map::new();
        block.insert(operator.into(), Value::Object(test));
        Self(block)
    }

    /// The raw condition block.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Condition {
    fn from(block: Map<String, Value>) -> Self {
        Self(block)
    }
}

/// One statement of a [`PolicyDocument`](crate::PolicyDocument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// Always [`INVOKE_ACTION`].
    pub action: String,
    /// Allow or deny.
    pub effect: Effect,
    /// Method ARN the statement applies to.
    pub resource: String,
    /// Qualifying conditions; omitted from the output when empty.
    #[serde(rename = "condition", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Statement {
    /// An invoke statement on `resource`.
    pub fn new(effect: Effect, resource: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            action: INVOKE_ACTION.to_string(),
            effect,
            resource: resource.into(),
            conditions,
        }
    }

    /// Check whether the statement carries conditions.
    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }
}
