//! Configuration errors.
//!
//! These are raised when a rule, dictionary or generator request is built
//! with values that can never make sense. Policy violations are not errors:
//! they are reported through [`RuleResult`](crate::RuleResult).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Character class {0} has no characters")]
    EmptyCharacterSet(String),
    #[error("Minimum number of characters must be greater than zero")]
    ZeroMinimum,
    #[error("Characteristics threshold must be between 1 and {available}, got {required}")]
    CharacteristicsOutOfRange { required: usize, available: usize },
    #[error("Rule set is empty")]
    EmptyRuleSet,
    #[error("Minimum length {min} is greater than maximum length {max}")]
    InvertedLength { min: usize, max: usize },
    #[error("Dictionary is not sorted at index {0}")]
    UnsortedDictionary(usize),
    #[error("Sequence window must be between 3 and {max}, got {length}")]
    InvalidSequenceWindow { length: usize, max: usize },
    #[error("Repeat length must be at least 3, got {0}")]
    InvalidRepeatLength(usize),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Password length must be greater than zero")]
    ZeroLength,
    #[error("Password length {length} is below the sum of character minimums {required}")]
    LengthBelowMinimums { length: usize, required: usize },
}
