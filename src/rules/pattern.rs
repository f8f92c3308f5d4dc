//! Pattern rules - a regex that must be absent, or must be present.

use regex::Regex;

use super::Rule;
use crate::codes::{ALLOWED_MATCH, ILLEGAL_MATCH};
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

/// Fails for every match of the pattern found in the password.
#[derive(Debug, Clone)]
pub struct IllegalRegexRule {
    pattern: Regex,
    report_all: bool,
}

impl IllegalRegexRule {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            report_all: true,
        })
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for IllegalRegexRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        for m in self.pattern.find_iter(data.cleartext()) {
            result.add_error(
                ILLEGAL_MATCH,
                [("match", m.as_str()), ("pattern", self.pattern.as_str())],
            );
            if !self.report_all {
                break;
            }
        }
        result
    }
}

/// Fails when the pattern occurs nowhere in the password.
#[derive(Debug, Clone)]
pub struct AllowedRegexRule {
    pattern: Regex,
}

impl AllowedRegexRule {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for AllowedRegexRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        if !self.pattern.is_match(data.cleartext()) {
            result.add_error(ALLOWED_MATCH, [("pattern", self.pattern.as_str())]);
        }
        result
    }
}
