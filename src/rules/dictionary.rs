//! Dictionary rules - reject passwords built from dictionary words.

use std::sync::Arc;

use super::{Rule, reversed};
use crate::codes::{ILLEGAL_WORD, ILLEGAL_WORD_REVERSED};
use crate::data::{PasswordData, RuleResult};
use crate::dictionary::Dictionary;

fn report(result: &mut RuleResult, code: &str, words: Vec<&str>) {
    for word in words {
        result.add_error(code, [("matchingWord", word)]);
    }
}

/// Every distinct dictionary word occurring anywhere in already folded
/// `text`, in order of first occurrence.
fn substring_matches<'a>(dictionary: &'a Dictionary, text: &str) -> Vec<&'a str> {
    let mut found: Vec<&str> = Vec::new();
    for (start, _) in text.char_indices() {
        for word in dictionary.prefixes_of_folded(&text[start..]) {
            if !found.contains(&word) {
                found.push(word);
            }
        }
    }
    found
}

/// Fails when the whole password is a dictionary word.
#[derive(Debug, Clone)]
pub struct DictionaryRule {
    dictionary: Arc<Dictionary>,
    match_backwards: bool,
}

impl DictionaryRule {
    pub fn new(dictionary: impl Into<Arc<Dictionary>>) -> Self {
        Self {
            dictionary: dictionary.into(),
            match_backwards: false,
        }
    }

    /// Also reject passwords whose reversal is a dictionary word.
    pub fn with_match_backwards(mut self, match_backwards: bool) -> Self {
        self.match_backwards = match_backwards;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl Rule for DictionaryRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let text = data.cleartext();
        if let Some(word) = self.dictionary.search(text) {
            report(&mut result, ILLEGAL_WORD, vec![word]);
        }
        if self.match_backwards && text.chars().count() > 1 {
            if let Some(word) = self.dictionary.search(&reversed(text)) {
                report(&mut result, ILLEGAL_WORD_REVERSED, vec![word]);
            }
        }
        result
    }
}

/// Fails when any dictionary word occurs inside the password.
#[derive(Debug, Clone)]
pub struct DictionarySubstringRule {
    dictionary: Arc<Dictionary>,
    match_backwards: bool,
}

impl DictionarySubstringRule {
    pub fn new(dictionary: impl Into<Arc<Dictionary>>) -> Self {
        Self {
            dictionary: dictionary.into(),
            match_backwards: false,
        }
    }

    pub fn with_match_backwards(mut self, match_backwards: bool) -> Self {
        self.match_backwards = match_backwards;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl Rule for DictionarySubstringRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let text = self.dictionary.fold(data.cleartext());
        report(&mut result, ILLEGAL_WORD, substring_matches(&self.dictionary, &text));
        if self.match_backwards && text.chars().count() > 1 {
            let words = substring_matches(&self.dictionary, &reversed(&text));
            report(&mut result, ILLEGAL_WORD_REVERSED, words);
        }
        result
    }
}
