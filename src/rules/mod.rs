//! Password policy rules
//!
//! Each rule checks one aspect of a password and reports every violation
//! it finds as a [`RuleResultDetail`](crate::RuleResultDetail).

mod character;
mod characteristics;
mod charset;
mod dictionary;
mod length;
mod pattern;
mod reference;
mod repeat;
mod sequence;
mod username;

pub use character::{CharacterData, CharacterRule};
pub use characteristics::{CharacterCharacteristicsRule, SubRuleReporting};
pub use charset::{AllowedCharacterRule, IllegalCharacterRule, WhitespaceRule};
pub use dictionary::{DictionaryRule, DictionarySubstringRule};
pub use length::LengthRule;
pub use pattern::{AllowedRegexRule, IllegalRegexRule};
pub use reference::{DigestHistoryRule, DigestSourceRule, HistoryRule, PasswordDigest, SourceRule};
pub use repeat::RepeatCharacterRegexRule;
pub use sequence::{IllegalSequenceRule, Sequence};
pub use username::UsernameRule;

use crate::data::{PasswordData, RuleResult};

/// A reusable policy check.
///
/// Implementations hold only immutable configuration, so a single instance
/// can serve any number of concurrent validations. `validate` is pure: the
/// same input always yields the same result.
pub trait Rule: Send + Sync {
    fn validate(&self, data: &PasswordData) -> RuleResult;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        (**self).validate(data)
    }
}

impl<R: Rule + ?Sized> Rule for std::sync::Arc<R> {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        (**self).validate(data)
    }
}

pub(crate) fn reversed(text: &str) -> String {
    text.chars().rev().collect()
}

/// Collects chars sorted and deduplicated, the canonical form of a character set.
pub(crate) fn char_set(chars: impl IntoIterator<Item = char>) -> Vec<char> {
    let mut set: Vec<char> = chars.into_iter().collect();
    set.sort_unstable();
    set.dedup();
    set
}

pub(crate) fn set_contains(set: &[char], c: char) -> bool {
    set.binary_search(&c).is_ok()
}

/// Distinct chars of `text` that satisfy `pred`, in order of first occurrence.
pub(crate) fn distinct_matching(text: &str, pred: impl Fn(char) -> bool) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars().filter(|&c| pred(c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}
