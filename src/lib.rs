//! Password policy library
//!
//! This library enforces and synthesizes password policies. A policy is a
//! list of composable rules; a [`PasswordValidator`] applies every rule to
//! a candidate password and collects all violations, and a
//! [`PasswordGenerator`] builds passwords that satisfy character-class
//! minimums.
//!
//! # Features
//!
//! - `async` (default): Enables `PasswordValidator::validate_tx` with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_POLICY_DICTIONARY_PATH`: Word list used by [`load_dictionary`]
//!   (default: `./assets/dictionary.txt`)
//! - `PWD_POLICY_MESSAGES_PATH`: Optional message overrides read by
//!   [`CatalogMessageResolver::from_env`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pwd_policy::{
//!     CharacterCharacteristicsRule, CharacterData, CharacterRule, Dictionary,
//!     DictionarySubstringRule, LengthRule, PasswordData, PasswordValidator, SubRuleReporting,
//! };
//!
//! let characteristics = CharacterCharacteristicsRule::new(
//!     vec![
//!         CharacterRule::new(CharacterData::upper_case(), 1).unwrap(),
//!         CharacterRule::new(CharacterData::lower_case(), 1).unwrap(),
//!         CharacterRule::new(CharacterData::digit(), 1).unwrap(),
//!     ],
//!     3,
//!     SubRuleReporting::Detailed,
//! )
//! .unwrap();
//! let dictionary = Dictionary::new(["password", "letmein"], false);
//!
//! let validator = PasswordValidator::new(vec![
//!     Arc::new(LengthRule::new(8, 64).unwrap()),
//!     Arc::new(characteristics),
//!     Arc::new(DictionarySubstringRule::new(dictionary)),
//! ]);
//!
//! let result = validator.validate(&PasswordData::new("MyPassword1"));
//! assert!(!result.is_valid());
//! for message in validator.get_messages(&result) {
//!     println!("{message}");
//! }
//! ```

pub mod codes;

// Internal modules
mod data;
mod dictionary;
mod error;
mod generator;
mod messages;
mod rules;
mod validator;

// Public API
pub use data::{PasswordData, Reference, ReferenceKind, ReferenceSecret, RuleResult, RuleResultDetail};
pub use dictionary::{
    Dictionary, DictionaryError, get_dictionary_path, load_dictionary, load_dictionary_from_path,
};
pub use error::ConfigError;
pub use generator::PasswordGenerator;
pub use messages::{CatalogMessageResolver, MessageError, MessageResolver};
pub use rules::{
    AllowedCharacterRule, AllowedRegexRule, CharacterCharacteristicsRule, CharacterData,
    CharacterRule, DictionaryRule, DictionarySubstringRule, DigestHistoryRule, DigestSourceRule,
    HistoryRule, IllegalCharacterRule, IllegalRegexRule, IllegalSequenceRule, LengthRule,
    PasswordDigest, RepeatCharacterRegexRule, Rule, Sequence, SourceRule, SubRuleReporting,
    UsernameRule, WhitespaceRule,
};
pub use validator::PasswordValidator;
