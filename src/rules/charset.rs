//! Character set rules - characters that must not appear, or the only
//! characters that may appear.

use super::{Rule, char_set, distinct_matching, set_contains};
use crate::codes::{ALLOWED_CHAR, ILLEGAL_CHAR, ILLEGAL_WHITESPACE};
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

/// Tab, line feed, vertical tab, form feed, carriage return and space.
const WHITESPACE: &str = "\t\n\u{b}\u{c}\r ";

fn non_empty_set(code: &str, characters: &str) -> Result<Vec<char>, ConfigError> {
    if characters.is_empty() {
        return Err(ConfigError::EmptyCharacterSet(code.to_string()));
    }
    Ok(char_set(characters.chars()))
}

fn report_chars(
    result: &mut RuleResult,
    code: &str,
    param: &str,
    chars: Vec<char>,
    report_all: bool,
) {
    for c in chars {
        result.add_error(code, [(param, c)]);
        if !report_all {
            break;
        }
    }
}

/// Fails for each distinct password char found in the illegal set.
#[derive(Debug, Clone)]
pub struct IllegalCharacterRule {
    characters: Vec<char>,
    report_all: bool,
}

impl IllegalCharacterRule {
    pub fn new(characters: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            characters: non_empty_set(ILLEGAL_CHAR, characters)?,
            report_all: true,
        })
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }
}

impl Rule for IllegalCharacterRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let found = distinct_matching(data.cleartext(), |c| set_contains(&self.characters, c));
        report_chars(&mut result, ILLEGAL_CHAR, "illegalCharacter", found, self.report_all);
        result
    }
}

/// Fails for each distinct password char outside the allowed set.
#[derive(Debug, Clone)]
pub struct AllowedCharacterRule {
    characters: Vec<char>,
    report_all: bool,
}

impl AllowedCharacterRule {
    pub fn new(characters: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            characters: non_empty_set(ALLOWED_CHAR, characters)?,
            report_all: true,
        })
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }
}

impl Rule for AllowedCharacterRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let found = distinct_matching(data.cleartext(), |c| !set_contains(&self.characters, c));
        report_chars(&mut result, ALLOWED_CHAR, "illegalCharacter", found, self.report_all);
        result
    }
}

/// Rejects whitespace characters.
#[derive(Debug, Clone)]
pub struct WhitespaceRule {
    characters: Vec<char>,
    report_all: bool,
}

impl Default for WhitespaceRule {
    fn default() -> Self {
        Self {
            characters: char_set(WHITESPACE.chars()),
            report_all: true,
        }
    }
}

impl WhitespaceRule {
    /// Uses a caller-supplied whitespace set, e.g. to include Unicode spaces.
    pub fn with_characters(characters: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            characters: non_empty_set(ILLEGAL_WHITESPACE, characters)?,
            report_all: true,
        })
    }

    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }
}

impl Rule for WhitespaceRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let found = distinct_matching(data.cleartext(), |c| set_contains(&self.characters, c));
        report_chars(
            &mut result,
            ILLEGAL_WHITESPACE,
            "whitespaceCharacter",
            found,
            self.report_all,
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offending(result: &RuleResult, param: &str) -> Vec<String> {
        result
            .details()
            .iter()
            .map(|d| d.parameter(param).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_illegal_characters() {
        let rule = IllegalCharacterRule::new("<>&").unwrap();
        let result = rule.validate(&PasswordData::new("a<b>c<"));
        assert_eq!(offending(&result, "illegalCharacter"), vec!["<", ">"]);
        assert_eq!(result.details()[0].error_code(), ILLEGAL_CHAR);
        assert!(rule.validate(&PasswordData::new("safe")).is_valid());
    }

    #[test]
    fn test_allowed_characters() {
        let rule = AllowedCharacterRule::new("abc123").unwrap();
        assert!(rule.validate(&PasswordData::new("cab321")).is_valid());

        let result = rule.validate(&PasswordData::new("abXc1YX"));
        assert_eq!(offending(&result, "illegalCharacter"), vec!["X", "Y"]);
        assert_eq!(result.details()[0].error_code(), ALLOWED_CHAR);

        let first_only = AllowedCharacterRule::new("abc").unwrap().with_report_all(false);
        assert_eq!(first_only.validate(&PasswordData::new("xyz")).details().len(), 1);
    }

    #[test]
    fn test_whitespace() {
        let rule = WhitespaceRule::default();
        let result = rule.validate(&PasswordData::new("pass word\t"));
        assert_eq!(offending(&result, "whitespaceCharacter"), vec![" ", "\t"]);
        assert!(rule.validate(&PasswordData::new("password")).is_valid());
    }

    #[test]
    fn test_whitespace_custom_set() {
        let rule = WhitespaceRule::with_characters(" \u{a0}").unwrap();
        assert!(!rule.validate(&PasswordData::new("no\u{a0}break")).is_valid());
        assert!(rule.validate(&PasswordData::new("tab\tonly")).is_valid());
    }

    #[test]
    fn test_empty_character_sets_rejected() {
        assert_eq!(
            IllegalCharacterRule::new("").unwrap_err(),
            ConfigError::EmptyCharacterSet(ILLEGAL_CHAR.to_string())
        );
        assert_eq!(
            AllowedCharacterRule::new("").unwrap_err(),
            ConfigError::EmptyCharacterSet(ALLOWED_CHAR.to_string())
        );
        assert_eq!(
            WhitespaceRule::with_characters("").unwrap_err(),
            ConfigError::EmptyCharacterSet(ILLEGAL_WHITESPACE.to_string())
        );
    }
}
