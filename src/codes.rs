//! Error codes carried by [`RuleResultDetail`](crate::RuleResultDetail)s.
//!
//! These are also the keys of the default message catalog.

pub const HISTORY_VIOLATION: &str = "HISTORY_VIOLATION";
pub const ILLEGAL_WORD: &str = "ILLEGAL_WORD";
pub const ILLEGAL_WORD_REVERSED: &str = "ILLEGAL_WORD_REVERSED";
pub const ILLEGAL_MATCH: &str = "ILLEGAL_MATCH";
pub const ALLOWED_MATCH: &str = "ALLOWED_MATCH";
pub const ILLEGAL_CHAR: &str = "ILLEGAL_CHAR";
pub const ALLOWED_CHAR: &str = "ALLOWED_CHAR";
pub const ILLEGAL_SEQUENCE: &str = "ILLEGAL_SEQUENCE";
pub const ILLEGAL_USERNAME: &str = "ILLEGAL_USERNAME";
pub const ILLEGAL_USERNAME_REVERSED: &str = "ILLEGAL_USERNAME_REVERSED";
pub const ILLEGAL_WHITESPACE: &str = "ILLEGAL_WHITESPACE";
pub const INSUFFICIENT_UPPERCASE: &str = "INSUFFICIENT_UPPERCASE";
pub const INSUFFICIENT_LOWERCASE: &str = "INSUFFICIENT_LOWERCASE";
pub const INSUFFICIENT_ALPHABETICAL: &str = "INSUFFICIENT_ALPHABETICAL";
pub const INSUFFICIENT_DIGIT: &str = "INSUFFICIENT_DIGIT";
pub const INSUFFICIENT_SPECIAL: &str = "INSUFFICIENT_SPECIAL";
pub const INSUFFICIENT_CHARACTERISTICS: &str = "INSUFFICIENT_CHARACTERISTICS";
pub const SOURCE_VIOLATION: &str = "SOURCE_VIOLATION";
pub const TOO_LONG: &str = "TOO_LONG";
pub const TOO_SHORT: &str = "TOO_SHORT";
