//! Repeat rule - detects the same character repeated many times in a row.

use super::Rule;
use crate::codes::ILLEGAL_MATCH;
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

const DEFAULT_RUN: usize = 4;
const MIN_RUN: usize = 3;

/// Fails on any run of `run_length` or more identical consecutive chars.
#[derive(Debug, Clone)]
pub struct RepeatCharacterRegexRule {
    run_length: usize,
    report_all: bool,
}

impl Default for RepeatCharacterRegexRule {
    fn default() -> Self {
        Self {
            run_length: DEFAULT_RUN,
            report_all: true,
        }
    }
}

impl RepeatCharacterRegexRule {
    pub fn new(run_length: usize) -> Result<Self, ConfigError> {
        if run_length < MIN_RUN {
            return Err(ConfigError::InvalidRepeatLength(run_length));
        }
        Ok(Self {
            run_length,
            ..Self::default()
        })
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }
}

/// Maximal runs of identical chars as (char, length).
fn runs(text: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        match runs.last_mut() {
            Some((prev, len)) if *prev == c => *len += 1,
            _ => runs.push((c, 1)),
        }
    }
    runs
}

impl Rule for RepeatCharacterRegexRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        for (c, len) in runs(data.cleartext()) {
            if len < self.run_length {
                continue;
            }
            let run: String = std::iter::repeat_n(c, len).collect();
            result.add_error(
                ILLEGAL_MATCH,
                [
                    ("match", run),
                    ("repeatedCharacter", c.to_string()),
                    ("runLength", len.to_string()),
                ],
            );
            if !self.report_all {
                break;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_default_run() {
        let rule = RepeatCharacterRegexRule::default();
        assert!(rule.validate(&PasswordData::new("aaabbb111")).is_valid());

        let result = rule.validate(&PasswordData::new("xaaaaay"));
        let detail = &result.details()[0];
        assert_eq!(detail.error_code(), ILLEGAL_MATCH);
        assert_eq!(detail.parameter("match"), Some("aaaaa"));
        assert_eq!(detail.parameter("repeatedCharacter"), Some("a"));
        assert_eq!(detail.parameter("runLength"), Some("5"));
    }

    #[test]
    fn test_repeat_reports_every_run() {
        let rule = RepeatCharacterRegexRule::new(3).unwrap();
        let result = rule.validate(&PasswordData::new("aaaaBBBB1111"));
        assert_eq!(result.details().len(), 3);

        let first_only = RepeatCharacterRegexRule::new(3).unwrap().with_report_all(false);
        assert_eq!(first_only.validate(&PasswordData::new("aaaaBBBB1111")).details().len(), 1);
    }

    #[test]
    fn test_repeat_multibyte_chars() {
        let rule = RepeatCharacterRegexRule::new(3).unwrap();
        assert!(!rule.validate(&PasswordData::new("ééé")).is_valid());
    }

    #[test]
    fn test_repeat_invalid_length() {
        assert_eq!(
            RepeatCharacterRegexRule::new(2).unwrap_err(),
            ConfigError::InvalidRepeatLength(2)
        );
    }
}
