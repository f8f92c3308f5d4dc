//! Character rules - minimum counts of a character class.

use std::borrow::Cow;

use super::{Rule, char_set, set_contains};
use crate::codes::{
    INSUFFICIENT_ALPHABETICAL, INSUFFICIENT_DIGIT, INSUFFICIENT_LOWERCASE, INSUFFICIENT_SPECIAL,
    INSUFFICIENT_UPPERCASE,
};
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A named character class: the error code reported when too few of its
/// characters are present, and the characters themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterData {
    error_code: Cow<'static, str>,
    characters: Vec<char>,
}

impl CharacterData {
    /// Builds a custom class. Duplicate characters are collapsed.
    pub fn new(
        error_code: impl Into<Cow<'static, str>>,
        characters: &str,
    ) -> Result<Self, ConfigError> {
        let error_code = error_code.into();
        if characters.is_empty() {
            return Err(ConfigError::EmptyCharacterSet(error_code.into_owned()));
        }
        Ok(Self {
            error_code,
            characters: char_set(characters.chars()),
        })
    }

    fn builtin(error_code: &'static str, characters: &str) -> Self {
        Self {
            error_code: Cow::Borrowed(error_code),
            characters: char_set(characters.chars()),
        }
    }

    pub fn upper_case() -> Self {
        Self::builtin(INSUFFICIENT_UPPERCASE, UPPER)
    }

    pub fn lower_case() -> Self {
        Self::builtin(INSUFFICIENT_LOWERCASE, LOWER)
    }

    pub fn alphabetical() -> Self {
        Self::builtin(INSUFFICIENT_ALPHABETICAL, &format!("{UPPER}{LOWER}"))
    }

    pub fn digit() -> Self {
        Self::builtin(INSUFFICIENT_DIGIT, DIGITS)
    }

    pub fn special() -> Self {
        Self::builtin(INSUFFICIENT_SPECIAL, SPECIAL)
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Members of the class, sorted and without duplicates.
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    pub fn contains(&self, c: char) -> bool {
        set_contains(&self.characters, c)
    }

    /// Occurrences (with repetition) of class members in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        text.chars().filter(|&c| self.contains(c)).count()
    }
}

/// Requires at least `minimum` characters of a class.
#[derive(Debug, Clone)]
pub struct CharacterRule {
    data: CharacterData,
    minimum: usize,
}

impl CharacterRule {
    pub fn new(data: CharacterData, minimum: usize) -> Result<Self, ConfigError> {
        if minimum == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        Ok(Self { data, minimum })
    }

    pub fn data(&self) -> &CharacterData {
        &self.data
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }
}

impl Rule for CharacterRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let count = self.data.count_in(data.cleartext());
        if count < self.minimum {
            let valid: String = self.data.characters.iter().collect();
            result.add_error(
                self.data.error_code(),
                [
                    ("minimumRequired", self.minimum.to_string()),
                    ("matchingCharacterCount", count.to_string()),
                    ("validCharacters", valid),
                ],
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_character_rule_missing_uppercase() {
        let rule = CharacterRule::new(CharacterData::upper_case(), 1).unwrap();
        let result = rule.validate(&PasswordData::new("lowercase123!"));
        assert!(!result.is_valid());
        let detail = &result.details()[0];
        assert_eq!(detail.error_code(), INSUFFICIENT_UPPERCASE);
        assert_eq!(detail.parameter("minimumRequired"), Some("1"));
        assert_eq!(detail.parameter("matchingCharacterCount"), Some("0"));
    }

    #[test]
    fn test_character_rule_counts_repetitions() {
        let rule = CharacterRule::new(CharacterData::digit(), 3).unwrap();
        assert!(rule.validate(&PasswordData::new("a1b1c1")).is_valid());
        assert!(!rule.validate(&PasswordData::new("a1b1c")).is_valid());
    }

    #[test]
    fn test_character_rule_special() {
        let rule = CharacterRule::new(CharacterData::special(), 2).unwrap();
        assert!(rule.validate(&PasswordData::new("HasAll123!@#")).is_valid());
        assert!(!rule.validate(&PasswordData::new("NoSpecial123")).is_valid());
    }

    #[test]
    fn test_character_rule_zero_minimum_rejected() {
        assert_eq!(
            CharacterRule::new(CharacterData::lower_case(), 0).unwrap_err(),
            ConfigError::ZeroMinimum
        );
    }

    #[test]
    fn test_character_data_custom() {
        let data = CharacterData::new("INSUFFICIENT_VOWELS", "aeiouaa").unwrap();
        assert_eq!(data.characters(), &['a', 'e', 'i', 'o', 'u']);
        assert_eq!(data.count_in("banana"), 3);
        assert!(matches!(
            CharacterData::new("EMPTY", ""),
            Err(ConfigError::EmptyCharacterSet(code)) if code == "EMPTY"
        ));
    }

    proptest! {
        #[test]
        fn character_rule_valid_iff_count_reaches_minimum(password in "[a-zA-Z0-9!@#]{0,24}", minimum in 1usize..6) {
            let rule = CharacterRule::new(CharacterData::digit(), minimum).unwrap();
            let count = password.chars().filter(char::is_ascii_digit).count();
            let result = rule.validate(&PasswordData::new(password.clone()));
            prop_assert_eq!(result.is_valid(), count >= minimum);
            prop_assert_eq!(result.clone(), rule.validate(&PasswordData::new(password)));
        }
    }
}
