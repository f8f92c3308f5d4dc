//! Message resolution
//!
//! Turns result details into display text. Nothing else in the crate
//! produces user-facing strings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codes::*;
use crate::data::RuleResultDetail;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Message file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read message file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Malformed message entry at line {line}")]
    MalformedLine { line: usize },
}

/// Maps an error code and its parameters to display text.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, detail: &RuleResultDetail) -> String;
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (HISTORY_VIOLATION, "Password matches one of {0} previous passwords."),
    (ILLEGAL_WORD, "Password contains the dictionary word '{0}'."),
    (ILLEGAL_WORD_REVERSED, "Password contains the reversed dictionary word '{0}'."),
    (ILLEGAL_MATCH, "Password matches the illegal pattern '{0}'."),
    (ALLOWED_MATCH, "Password must match pattern '{0}'."),
    (ILLEGAL_CHAR, "Password contains the illegal character '{0}'."),
    (ALLOWED_CHAR, "Password contains the illegal character '{0}'."),
    (ILLEGAL_SEQUENCE, "Password contains the illegal sequence '{0}'."),
    (ILLEGAL_USERNAME, "Password contains the user id '{0}'."),
    (ILLEGAL_USERNAME_REVERSED, "Password contains the user id '{0}' in reverse."),
    (ILLEGAL_WHITESPACE, "Password cannot contain whitespace characters."),
    (INSUFFICIENT_UPPERCASE, "Password must contain at least {0} uppercase characters."),
    (INSUFFICIENT_LOWERCASE, "Password must contain at least {0} lowercase characters."),
    (INSUFFICIENT_ALPHABETICAL, "Password must contain at least {0} alphabetical characters."),
    (INSUFFICIENT_DIGIT, "Password must contain at least {0} digit characters."),
    (INSUFFICIENT_SPECIAL, "Password must contain at least {0} special characters."),
    (
        INSUFFICIENT_CHARACTERISTICS,
        "Password matches {0} of {2} character rules, but {1} are required.",
    ),
    (SOURCE_VIOLATION, "Password cannot be the same as your {0} password."),
    (TOO_LONG, "Password must be no more than {1} characters in length."),
    (TOO_SHORT, "Password must be at least {0} characters in length."),
];

/// Fills `{0}`, `{1}` and `{2}` with the detail's parameter values in a
/// single pass over the template. Substituted text is never rescanned, and
/// placeholders without a value are kept verbatim.
fn format_template(template: &str, values: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = match tail.as_bytes() {
            [b'{', digit @ b'0'..=b'2', b'}', ..] => values.get(usize::from(digit - b'0')),
            _ => None,
        };
        match value {
            Some(value) => {
                out.push_str(value);
                rest = &tail[3..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Lookup-table resolver keyed by error code.
#[derive(Debug, Clone)]
pub struct CatalogMessageResolver {
    templates: HashMap<String, String>,
}

impl Default for CatalogMessageResolver {
    fn default() -> Self {
        Self {
            templates: DEFAULT_MESSAGES
                .iter()
                .map(|(code, template)| (code.to_string(), template.to_string()))
                .collect(),
        }
    }
}

impl CatalogMessageResolver {
    /// Adds or replaces the template for one error code.
    pub fn with_template(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(code.into(), template.into());
        self
    }

    /// Default catalog overlaid with the `KEY=template` file named by
    /// `PWD_POLICY_MESSAGES_PATH`, when set.
    pub fn from_env() -> Result<Self, MessageError> {
        match std::env::var("PWD_POLICY_MESSAGES_PATH") {
            Ok(path) => Self::from_path(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Default catalog overlaid with a `KEY=template` file. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MessageError> {
        let path = path.as_ref();
        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Message catalog loading FAILED: FileNotFound {:?}", path);
            return Err(MessageError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut resolver = Self::default();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((code, template)) = line.split_once('=') else {
                return Err(MessageError::MalformedLine { line: index + 1 });
            };
            resolver
                .templates
                .insert(code.trim().to_string(), template.trim().to_string());
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Message catalog loaded from {:?}", path);

        Ok(resolver)
    }
}

impl MessageResolver for CatalogMessageResolver {
    fn resolve(&self, detail: &RuleResultDetail) -> String {
        let values: Vec<&str> = detail.values().collect();
        match self.templates.get(detail.error_code()) {
            Some(template) => format_template(template, &values),
            None if values.is_empty() => detail.error_code().to_string(),
            None => format!("{}: {}", detail.error_code(), values.join(", ")),
        }
    }
}
