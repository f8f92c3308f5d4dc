//! Length rule - checks password length bounds.

use super::Rule;
use crate::codes::{TOO_LONG, TOO_SHORT};
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

/// Requires the password length (in chars) to fall within `[min, max]`.
#[derive(Debug, Clone)]
pub struct LengthRule {
    min: usize,
    max: usize,
}

impl LengthRule {
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedLength { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound only.
    pub fn at_least(min: usize) -> Self {
        Self { min, max: usize::MAX }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Rule for LengthRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let len = data.cleartext().chars().count();
        let mut result = RuleResult::valid();
        let code = if len < self.min {
            TOO_SHORT
        } else if len > self.max {
            TOO_LONG
        } else {
            return result;
        };
        result.add_error(code, [("minimumLength", self.min), ("maximumLength", self.max)]);
        result
    }
}
