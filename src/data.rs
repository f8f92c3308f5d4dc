//! Per-request data: the password under evaluation and the result of a rule.

use secrecy::{ExposeSecret, SecretString};

fn secret(value: String) -> SecretString {
    SecretString::new(value.into_boxed_str())
}

/// Which reference rules a [`Reference`] is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A password the user has chosen before.
    History,
    /// A password the user holds on another system.
    Source,
}

/// Stored form of a reference password.
#[derive(Debug)]
pub enum ReferenceSecret {
    Cleartext(SecretString),
    /// Opaque digest produced by an external digest provider.
    Digest(String),
}

/// A previous or external password record used for non-reuse checks.
#[derive(Debug)]
pub struct Reference {
    kind: ReferenceKind,
    label: String,
    secret: ReferenceSecret,
}

impl Reference {
    pub fn new(kind: ReferenceKind, label: impl Into<String>, secret: ReferenceSecret) -> Self {
        Self {
            kind,
            label: label.into(),
            secret,
        }
    }

    pub fn history(label: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(
            ReferenceKind::History,
            label,
            ReferenceSecret::Cleartext(secret(password.into())),
        )
    }

    pub fn history_digest(label: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::new(ReferenceKind::History, label, ReferenceSecret::Digest(digest.into()))
    }

    pub fn source(label: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(
            ReferenceKind::Source,
            label,
            ReferenceSecret::Cleartext(secret(password.into())),
        )
    }

    pub fn source_digest(label: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Source, label, ReferenceSecret::Digest(digest.into()))
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn secret(&self) -> &ReferenceSecret {
        &self.secret
    }
}

/// Password under evaluation plus the context some rules need.
///
/// Built once per validation call and never modified afterwards.
///
/// ```
/// use pwd_policy::{PasswordData, Reference};
///
/// let data = PasswordData::new("Tr0ub4dor&3")
///     .with_username("alice")
///     .with_reference(Reference::history("2023-01", "hunter2"));
/// assert_eq!(data.username(), Some("alice"));
/// ```
#[derive(Debug)]
pub struct PasswordData {
    password: SecretString,
    username: Option<String>,
    references: Vec<Reference>,
}

impl PasswordData {
    pub fn new(password: impl Into<String>) -> Self {
        Self::from_secret(secret(password.into()))
    }

    pub fn from_secret(password: SecretString) -> Self {
        Self {
            password,
            username: None,
            references: Vec::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn with_references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub(crate) fn cleartext(&self) -> &str {
        self.password.expose_secret()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// References of one kind, in the order they were supplied.
    pub fn references_of(&self, kind: ReferenceKind) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.kind == kind)
    }
}

/// One violation record: an error code plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResultDetail {
    error_code: String,
    parameters: Vec<(String, String)>,
}

impl RuleResultDetail {
    pub fn new<I, K, V>(error_code: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self {
            error_code: error_code.into(),
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter values in insertion order, as used by positional templates.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|(_, v)| v.as_str())
    }
}

/// Outcome of evaluating one rule (or a whole validator).
///
/// A result is valid exactly when it carries no details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleResult {
    details: Vec<RuleResultDetail>,
}

impl RuleResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_details(details: Vec<RuleResultDetail>) -> Self {
        Self { details }
    }

    pub fn is_valid(&self) -> bool {
        self.details.is_empty()
    }

    pub fn details(&self) -> &[RuleResultDetail] {
        &self.details
    }

    pub fn into_details(self) -> Vec<RuleResultDetail> {
        self.details
    }

    pub fn add_error<I, K, V>(&mut self, error_code: impl Into<String>, parameters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.details.push(RuleResultDetail::new(error_code, parameters));
    }

    /// Appends the details of `other`, keeping their order.
    pub fn merge(&mut self, other: RuleResult) {
        self.details.extend(other.details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_validity_follows_details() {
        let mut result = RuleResult::valid();
        assert!(result.is_valid());

        result.add_error("TOO_SHORT", [("minimumLength", 8), ("maximumLength", 16)]);
        assert!(!result.is_valid());
        assert_eq!(result.details()[0].parameter("maximumLength"), Some("16"));
        assert_eq!(result.details()[0].values().collect::<Vec<_>>(), vec!["8", "16"]);
    }

    #[test]
    fn test_references_of_kind() {
        let data = PasswordData::new("secret")
            .with_reference(Reference::history("h1", "old"))
            .with_reference(Reference::source("ldap", "other"))
            .with_reference(Reference::history_digest("h2", "abcd"));

        let labels: Vec<_> = data
            .references_of(ReferenceKind::History)
            .map(Reference::label)
            .collect();
        assert_eq!(labels, vec!["h1", "h2"]);
    }

    #[test]
    fn test_debug_redacts_password() {
        let data = PasswordData::new("SuperSecret99");
        assert!(!format!("{:?}", data).contains("SuperSecret99"));
    }
}
