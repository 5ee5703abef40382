//! Policy documents.

use janus_core::ResourceDescriptor;
use serde::{Deserialize, Serialize};

use crate::builder::PolicyBuilder;
use crate::error::PolicyResult;
use crate::statement::{Effect, Statement};

/// Policy language version API Gateway expects.
pub const POLICY_VERSION: &str = "2012-10-17";

/// An ordered set of statements; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Always [`POLICY_VERSION`].
    pub version: String,
    /// Allow statements first, then deny statements.
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub(crate) fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement,
        }
    }

    /// Allow every method on every path of the resource's stage.
    pub fn allow_all(resource: &ResourceDescriptor) -> PolicyResult<Self> {
        PolicyBuilder::new(resource).allow_all_methods().build()
    }

    /// Deny every method on every path of the resource's stage.
    pub fn deny_all(resource: &ResourceDescriptor) -> PolicyResult<Self> {
        PolicyBuilder::new(resource).deny_all_methods().build()
    }

    /// Statements with the given effect, in document order.
    pub fn statements(&self, effect: Effect) -> impl Iterator<Item = &Statement> {
        self.statement.iter().filter(move |s| s.effect == effect)
    }

    /// Check whether any statement allows access.
    pub fn allows_anything(&self) -> bool {
        self.statements(Effect::Allow).next().is_some()
    }
}
