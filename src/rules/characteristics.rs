//! M-of-N composite over character rules.

use super::{CharacterRule, Rule};
use crate::codes::INSUFFICIENT_CHARACTERISTICS;
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

/// What a failing composite reports besides its summary detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubRuleReporting {
    /// Only the `INSUFFICIENT_CHARACTERISTICS` summary.
    Summary,
    /// The details of every failing sub-rule, followed by the summary.
    Detailed,
}

/// Valid when at least `num_characteristics` of its character rules pass.
#[derive(Debug, Clone)]
pub struct CharacterCharacteristicsRule {
    rules: Vec<CharacterRule>,
    num_characteristics: usize,
    reporting: SubRuleReporting,
}

impl CharacterCharacteristicsRule {
    pub fn new(
        rules: Vec<CharacterRule>,
        num_characteristics: usize,
        reporting: SubRuleReporting,
    ) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        if num_characteristics == 0 || num_characteristics > rules.len() {
            return Err(ConfigError::CharacteristicsOutOfRange {
                required: num_characteristics,
                available: rules.len(),
            });
        }
        Ok(Self {
            rules,
            num_characteristics,
            reporting,
        })
    }

    pub fn rules(&self) -> &[CharacterRule] {
        &self.rules
    }

    pub fn num_characteristics(&self) -> usize {
        self.num_characteristics
    }
}

impl Rule for CharacterCharacteristicsRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut satisfied = 0;
        let mut failures = RuleResult::valid();
        for rule in &self.rules {
            let sub = rule.validate(data);
            if sub.is_valid() {
                satisfied += 1;
            } else {
                failures.merge(sub);
            }
        }

        if satisfied >= self.num_characteristics {
            return RuleResult::valid();
        }

        let mut result = match self.reporting {
            SubRuleReporting::Detailed => failures,
            SubRuleReporting::Summary => RuleResult::valid(),
        };
        result.add_error(
            INSUFFICIENT_CHARACTERISTICS,
            [
                ("successCount", satisfied),
                ("minimumRequired", self.num_characteristics),
                ("ruleCount", self.rules.len()),
            ],
        );
        result
    }
}
