//! Reference rules - the password must not reuse a previous password or one
//! held on another system.
//!
//! Cleartext variants compare the candidate with stored cleartext; digest
//! variants pass the candidate through a [`PasswordDigest`] and compare the
//! opaque results. No hashing happens here.

use std::sync::Arc;

use secrecy::ExposeSecret;

use super::Rule;
use crate::codes::{HISTORY_VIOLATION, SOURCE_VIOLATION};
use crate::data::{PasswordData, Reference, ReferenceKind, ReferenceSecret, RuleResult};

/// External digest provider used by the digest reference rules.
pub trait PasswordDigest: Send + Sync {
    fn digest(&self, cleartext: &str) -> String;
}

impl<F> PasswordDigest for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn digest(&self, cleartext: &str) -> String {
        self(cleartext)
    }
}

fn cleartext_matches(password: &str, reference: &Reference) -> bool {
    match reference.secret() {
        ReferenceSecret::Cleartext(secret) => secret.expose_secret() == password,
        ReferenceSecret::Digest(_) => false,
    }
}

fn digest_matches(digest: &str, reference: &Reference) -> bool {
    match reference.secret() {
        ReferenceSecret::Digest(stored) => stored == digest,
        ReferenceSecret::Cleartext(_) => false,
    }
}

/// References of `kind` accepted by `matches`, all of them or the first.
fn matching<'a>(
    data: &'a PasswordData,
    kind: ReferenceKind,
    report_all: bool,
    matches: impl Fn(&Reference) -> bool,
) -> Vec<&'a Reference> {
    let found = data.references_of(kind).filter(|&r| matches(r));
    if report_all {
        found.collect()
    } else {
        found.take(1).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct HistoryOptions {
    report_all: bool,
    size_to_report: Option<usize>,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            report_all: true,
            size_to_report: None,
        }
    }
}

impl HistoryOptions {
    fn validate(&self, data: &PasswordData, matches: impl Fn(&Reference) -> bool) -> RuleResult {
        let mut result = RuleResult::valid();
        let size = data.references_of(ReferenceKind::History).count();
        if size == 0 {
            return result;
        }
        let reported = self.size_to_report.unwrap_or(size);
        for _ in matching(data, ReferenceKind::History, self.report_all, matches) {
            result.add_error(HISTORY_VIOLATION, [("historySize", reported)]);
        }
        result
    }
}

fn validate_source(
    data: &PasswordData,
    report_all: bool,
    matches: impl Fn(&Reference) -> bool,
) -> RuleResult {
    let mut result = RuleResult::valid();
    for reference in matching(data, ReferenceKind::Source, report_all, matches) {
        result.add_error(SOURCE_VIOLATION, [("source", reference.label())]);
    }
    result
}

/// Rejects reuse of a cleartext history entry.
#[derive(Debug, Clone, Default)]
pub struct HistoryRule {
    options: HistoryOptions,
}

impl HistoryRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// When false only the first matching entry is reported.
    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.options.report_all = report_all;
        self
    }

    /// History size shown in the detail instead of the number of entries
    /// supplied, for stores that keep fewer entries than the policy states.
    pub fn with_size_to_report(mut self, size: usize) -> Self {
        self.options.size_to_report = Some(size);
        self
    }
}

impl Rule for HistoryRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let password = data.cleartext();
        self.options.validate(data, |r| cleartext_matches(password, r))
    }
}

/// Rejects reuse of a digested history entry.
#[derive(Clone)]
pub struct DigestHistoryRule {
    digest: Arc<dyn PasswordDigest>,
    options: HistoryOptions,
}

impl DigestHistoryRule {
    pub fn new(digest: Arc<dyn PasswordDigest>) -> Self {
        Self {
            digest,
            options: HistoryOptions::default(),
        }
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.options.report_all = report_all;
        self
    }

    pub fn with_size_to_report(mut self, size: usize) -> Self {
        self.options.size_to_report = Some(size);
        self
    }
}

impl std::fmt::Debug for DigestHistoryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestHistoryRule")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Rule for DigestHistoryRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        if data.references_of(ReferenceKind::History).next().is_none() {
            return RuleResult::valid();
        }
        let digest = self.digest.digest(data.cleartext());
        self.options.validate(data, |r| digest_matches(&digest, r))
    }
}

/// Rejects a password equal to a cleartext source entry.
#[derive(Debug, Clone)]
pub struct SourceRule {
    report_all: bool,
}

impl Default for SourceRule {
    fn default() -> Self {
        Self { report_all: true }
    }
}

impl SourceRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }
}

impl Rule for SourceRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let password = data.cleartext();
        validate_source(data, self.report_all, |r| cleartext_matches(password, r))
    }
}

/// Rejects a password whose digest equals a digested source entry.
#[derive(Clone)]
pub struct DigestSourceRule {
    digest: Arc<dyn PasswordDigest>,
    report_all: bool,
}

impl DigestSourceRule {
    pub fn new(digest: Arc<dyn PasswordDigest>) -> Self {
        Self {
            digest,
            report_all: true,
        }
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }
}

impl std::fmt::Debug for DigestSourceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSourceRule")
            .field("report_all", &self.report_all)
            .finish_non_exhaustive()
    }
}

impl Rule for DigestSourceRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        if data.references_of(ReferenceKind::Source).next().is_none() {
            return RuleResult::valid();
        }
        let digest = self.digest.digest(data.cleartext());
        validate_source(data, self.report_all, |r| digest_matches(&digest, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn sha256(cleartext: &str) -> String {
        hex::encode(Sha256::digest(cleartext.as_bytes()))
    }

    fn history_data(password: &str) -> PasswordData {
        PasswordData::new(password)
            .with_reference(Reference::history("2024-01", "Spring2024!"))
            .with_reference(Reference::history("2024-04", "Summer2024!"))
            .with_reference(Reference::history("2024-07", "Spring2024!"))
    }

    #[test]
    fn test_history_no_references() {
        let rule = HistoryRule::new();
        assert!(rule.validate(&PasswordData::new("Spring2024!")).is_valid());
    }

    #[test]
    fn test_history_reports_all_matches() {
        let rule = HistoryRule::new();
        let result = rule.validate(&history_data("Spring2024!"));
        assert_eq!(result.details().len(), 2);
        assert_eq!(result.details()[0].error_code(), HISTORY_VIOLATION);
        assert_eq!(result.details()[0].parameter("historySize"), Some("3"));
        assert!(rule.validate(&history_data("Autumn2024!")).is_valid());
    }

    #[test]
    fn test_history_first_only_and_size_to_report() {
        let rule = HistoryRule::new().with_report_all(false).with_size_to_report(12);
        let result = rule.validate(&history_data("Spring2024!"));
        assert_eq!(result.details().len(), 1);
        assert_eq!(result.details()[0].parameter("historySize"), Some("12"));
    }

    #[test]
    fn test_history_ignores_source_entries() {
        let rule = HistoryRule::new();
        let data = PasswordData::new("shared").with_reference(Reference::source("ldap", "shared"));
        assert!(rule.validate(&data).is_valid());
    }

    #[test]
    fn test_digest_history() {
        let rule = DigestHistoryRule::new(Arc::new(sha256));
        let data = PasswordData::new("Winter2023!")
            .with_reference(Reference::history_digest("old", sha256("Winter2023!")))
            .with_reference(Reference::history_digest("older", sha256("Fall2023!")));
        let result = rule.validate(&data);
        assert_eq!(result.details().len(), 1);
        assert_eq!(result.details()[0].parameter("historySize"), Some("2"));

        let fresh = PasswordData::new("Brand-New-1")
            .with_reference(Reference::history_digest("old", sha256("Winter2023!")));
        assert!(rule.validate(&fresh).is_valid());
    }

    #[test]
    fn test_source_rule() {
        let rule = SourceRule::new();
        let data = PasswordData::new("corp-pass")
            .with_reference(Reference::source("ldap", "corp-pass"))
            .with_reference(Reference::source("kerberos", "other"));
        let result = rule.validate(&data);
        assert_eq!(result.details().len(), 1);
        assert_eq!(result.details()[0].error_code(), SOURCE_VIOLATION);
        assert_eq!(result.details()[0].parameter("source"), Some("ldap"));
    }

    #[test]
    fn test_digest_source_rule() {
        let rule = DigestSourceRule::new(Arc::new(sha256)).with_report_all(false);
        let data = PasswordData::new("corp-pass")
            .with_reference(Reference::source_digest("ldap", sha256("corp-pass")))
            .with_reference(Reference::source_digest("ad", sha256("corp-pass")));
        let result = rule.validate(&data);
        assert_eq!(result.details().len(), 1);
        assert_eq!(result.details()[0].parameter("source"), Some("ldap"));
    }
}
