//! Statement accumulation and document assembly.

use std::sync::LazyLock;

use janus_core::ResourceDescriptor;
use regex::Regex;

use crate::document::PolicyDocument;
use crate::error::{PolicyError, PolicyResult};
use crate::method::HttpMethod;
use crate::statement::{Condition, Effect, Statement};

/// Characters a resource path may contain.
pub const PATH_PATTERN: &str = "^[/.a-zA-Z0-9*-]+$";

// PATH_PATTERN is a literal, so compilation cannot fail at runtime.
static PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATH_PATTERN).expect("valid regex"));

#[derive(Debug, Clone)]
struct MethodEntry {
    resource_arn: String,
    conditions: Vec<Condition>,
}

/// Accumulates allow and deny entries for one API stage and assembles them
/// into a [`PolicyDocument`].
///
/// The target API is fixed by the [`ResourceDescriptor`] the builder is
/// created from; each entry names a method and path within it.
///
/// ```
/// use janus_core::ResourceDescriptor;
/// use janus_policy::{Effect, PolicyBuilder};
///
/// let resource = ResourceDescriptor::new("us-east-1", "123456789012", "abcdef123", "prod", "GET", "/users/1");
/// let policy = PolicyBuilder::new(&resource)
///     .allow_method("GET", "/users/1")?
///     .build()?;
///
/// assert_eq!(policy.statement.len(), 1);
/// assert_eq!(policy.statement[0].effect, Effect::Allow);
/// assert_eq!(
///     policy.statement[0].resource,
///     "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/GET/users/1"
/// );
/// # Ok::<(), janus_policy::PolicyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    arn_prefix: String,
    allow: Vec<MethodEntry>,
    deny: Vec<MethodEntry>,
}

impl PolicyBuilder {
    /// Start an empty policy for the resource's API and stage.
    pub fn new(resource: &ResourceDescriptor) -> Self {
        Self {
            arn_prefix: format!(
                "arn:{}:execute-api:{}:{}:{}/{}",
                resource.partition(),
                resource.region(),
                resource.account_id(),
                resource.api_id(),
                resource.stage()
            ),
            allow: Vec::new(),
            deny: Vec::new(),
        }
    }

    /// Allow every method on every path.
    pub fn allow_all_methods(&mut self) -> &mut Self {
        self.push(Effect::Allow, HttpMethod::All, "*", Vec::new());
        self
    }

    /// Deny every method on every path.
    pub fn deny_all_methods(&mut self) -> &mut Self {
        self.push(Effect::Deny, HttpMethod::All, "*", Vec::new());
        self
    }

    /// Allow one method on one path.
    pub fn allow_method(&mut self, method: &str, path: &str) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Allow, method, path, Vec::new())
    }

    /// Deny one method on one path.
    pub fn deny_method(&mut self, method: &str, path: &str) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Deny, method, path, Vec::new())
    }

    /// Allow one method on one path, subject to `conditions`.
    pub fn allow_method_with_conditions(
        &mut self,
        method: &str,
        path: &str,
        conditions: Vec<Condition>,
    ) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Allow, method, path, conditions)
    }

    /// Deny one method on one path, subject to `conditions`.
    pub fn deny_method_with_conditions(
        &mut self,
        method: &str,
        path: &str,
        conditions: Vec<Condition>,
    ) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Deny, method, path, conditions)
    }

    /// Add an entry after validating the method and path.
    ///
    /// A single leading `/` is dropped from `path` before the ARN is built.
    ///
    /// # Errors
    ///
    /// [`PolicyError::InvalidMethod`] for a verb outside the accepted set,
    /// [`PolicyError::InvalidResourcePath`] for a path with other characters.
    pub fn add_method(
        &mut self,
        effect: Effect,
        method: &str,
        path: &str,
        conditions: Vec<Condition>,
    ) -> PolicyResult<&mut Self> {
        let method: HttpMethod = method.parse()?;
        if !PATH_REGEX.is_match(path) {
            return Err(PolicyError::InvalidResourcePath {
                path: path.to_string(),
                pattern: PATH_PATTERN,
            });
        }
        self.push(effect, method, path, conditions);
        Ok(self)
    }

    fn push(&mut self, effect: Effect, method: HttpMethod, path: &str, conditions: Vec<Condition>) {
        let path = path.strip_prefix('/').unwrap_or(path);
        let entry = MethodEntry {
            resource_arn: format!("{}/{}/{}", self.arn_prefix, method, path),
            conditions,
        };
        match effect {
            Effect::Allow => self.allow.push(entry),
            Effect::Deny => self.deny.push(entry),
        }
    }

    /// Assemble the document.
    ///
    /// Per effect, conditional entries become one statement each in the
    /// order they were added, followed by a single statement for the
    /// unconditional entries. That statement carries the resource of the
    /// last unconditional entry. Allow statements precede deny statements.
    ///
    /// # Errors
    ///
    /// [`PolicyError::EmptyPolicy`] if nothing was added.
    pub fn build(&self) -> PolicyResult<PolicyDocument> {
        if self.allow.is_empty() && self.deny.is_empty() {
            return Err(PolicyError::EmptyPolicy);
        }

        let mut statements = statements_for(Effect::Allow, &self.allow);
        statements.extend(statements_for(Effect::Deny, &self.deny));
        Ok(PolicyDocument::new(statements))
    }
}

fn statements_for(effect: Effect, entries: &[MethodEntry]) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut blanket = None;
    for entry in entries {
        if entry.conditions.is_empty() {
            blanket = Some(&entry.resource_arn);
        } else {
            statements.push(Statement::new(
                effect,
                entry.resource_arn.clone(),
                entry.conditions.clone(),
            ));
        }
    }
    if let Some(resource) = blanket {
        statements.push(Statement::new(effect, resource.clone(), Vec::new()));
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_path_pattern_compiles() {
        assert!(Regex::new(PATH_PATTERN).is_ok());
        assert!(PATH_REGEX.is_match("/users/*"));
    }

    fn resource() -> ResourceDescriptor {
        ResourceDescriptor::new("us-east-1", "123456789012", "abcdef123", "prod", "GET", "/users/1")
    }

    fn ip_condition() -> Condition {
        Condition::new("IpAddress", "aws:SourceIp", "10.0.0.0/8")
    }

    #[test]
    fn test_arn_construction() {
        let policy = PolicyBuilder::new(&resource())
            .allow_method("GET", "/users/1")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            policy.statement[0].resource,
            "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/GET/users/1"
        );
    }

    #[test]
    fn test_leading_slash_is_optional() {
        let mut with_slash = PolicyBuilder::new(&resource());
        with_slash.allow_method("GET", "/users/1").unwrap();
        let mut without_slash = PolicyBuilder::new(&resource());
        without_slash.allow_method("GET", "users/1").unwrap();
        assert_eq!(with_slash.build(), without_slash.build());
    }

    #[test]
    fn test_allow_all_methods() {
        let policy = PolicyBuilder::new(&resource()).allow_all_methods().build().unwrap();
        assert_eq!(policy.statement.len(), 1);
        assert_eq!(policy.statement[0].effect, Effect::Allow);
        assert_eq!(
            policy.statement[0].resource,
            "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/*/*"
        );
    }

    #[test]
    fn test_invalid_method_either_effect() {
        for effect in [Effect::Allow, Effect::Deny] {
            let err = PolicyBuilder::new(&resource())
                .add_method(effect, "TRACE", "/users", Vec::new())
                .unwrap_err();
            assert_eq!(err, PolicyError::invalid_method("TRACE"));
        }
    }

    #[test]
    fn test_invalid_path() {
        for path in ["/users/{id}", "/users?x=1", "", "/caf\u{e9}"] {
            let err = PolicyBuilder::new(&resource())
                .allow_method("GET", path)
                .unwrap_err();
            assert!(matches!(err, PolicyError::InvalidResourcePath { .. }), "{path}");
        }
    }

    #[test]
    fn test_failed_add_leaves_builder_unchanged() {
        let mut builder = PolicyBuilder::new(&resource());
        assert!(builder.allow_method("TRACE", "/users").is_err());
        assert_eq!(builder.build(), Err(PolicyError::EmptyPolicy));
    }

    #[test]
    fn test_empty_policy() {
        assert_eq!(
            PolicyBuilder::new(&resource()).build(),
            Err(PolicyError::EmptyPolicy)
        );
    }

    #[test]
    fn test_conditional_entries_are_not_merged() {
        let policy = PolicyBuilder::new(&resource())
            .allow_method_with_conditions("GET", "/a", vec![ip_condition()])
            .unwrap()
            .allow_method_with_conditions("GET", "/b", vec![ip_condition()])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(policy.statement.len(), 2);
        assert!(policy.statement.iter().all(Statement::is_conditional));
        assert!(policy.statement[0].resource.ends_with("/GET/a"));
        assert!(policy.statement[1].resource.ends_with("/GET/b"));
    }

    #[test]
    fn test_blanket_entries_last_write_wins() {
        let policy = PolicyBuilder::new(&resource())
            .allow_method("GET", "/first")
            .unwrap()
            .allow_method("POST", "/second")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(policy.statement.len(), 1);
        assert!(policy.statement[0].resource.ends_with("/POST/second"));
    }

    #[test]
    fn test_statement_ordering() {
        let mut builder = PolicyBuilder::new(&resource());
        builder.deny_all_methods();
        builder
            .deny_method_with_conditions("DELETE", "/admin", vec![ip_condition()])
            .unwrap();
        builder.allow_method("GET", "/users").unwrap();
        builder
            .allow_method_with_conditions("PUT", "/users", vec![ip_condition()])
            .unwrap();

        let policy = builder.build().unwrap();
        let summary: Vec<(Effect, bool)> = policy
            .statement
            .iter()
            .map(|s| (s.effect, s.is_conditional()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Effect::Allow, true),
                (Effect::Allow, false),
                (Effect::Deny, true),
                (Effect::Deny, false),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_valid_paths_build(path in "/?[a-zA-Z0-9./*-]{1,40}") {
            let policy = PolicyBuilder::new(&resource())
                .deny_method("POST", &path)
                .unwrap()
                .build()
                .unwrap();
            let expected = format!(
                "arn:aws:execute-api:us-east-1:123456789012:abcdef123/prod/POST/{}",
                path.strip_prefix('/').unwrap_or(&path)
            );
            prop_assert_eq!(&policy.statement[0].resource, &expected);
        }

        #[test]
        fn prop_unlisted_verbs_rejected(verb in "[A-Z]{1,10}") {
            prop_assume!(verb.parse::<HttpMethod>().is_err());
            let result = PolicyBuilder::new(&resource()).allow_method(&verb, "/x").map(|_| ());
            prop_assert_eq!(result, Err(PolicyError::invalid_method(verb.clone())));
        }
    }
}
