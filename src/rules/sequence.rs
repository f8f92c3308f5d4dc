//! Sequence rule - detects runs taken from a reference sequence such as a
//! digit row or a keyboard row.

use super::{Rule, reversed};
use crate::codes::ILLEGAL_SEQUENCE;
use crate::data::{PasswordData, RuleResult};
use crate::error::ConfigError;

const DEFAULT_WINDOW: usize = 5;
const MIN_WINDOW: usize = 3;

/// A named reference sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    characters: String,
}

impl Sequence {
    pub fn new(name: impl Into<String>, characters: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: characters.into(),
        }
    }

    pub fn numerical() -> Self {
        Self::new("numerical", "0123456789")
    }

    pub fn alphabetical() -> Self {
        Self::new("alphabetical", "abcdefghijklmnopqrstuvwxyz")
    }

    pub fn qwerty_top_row() -> Self {
        Self::new("qwerty-top", "qwertyuiop")
    }

    pub fn qwerty_middle_row() -> Self {
        Self::new("qwerty-middle", "asdfghjkl")
    }

    pub fn qwerty_bottom_row() -> Self {
        Self::new("qwerty-bottom", "zxcvbnm")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn characters(&self) -> &str {
        &self.characters
    }
}

/// Rejects any `window` consecutive password chars that appear, in order,
/// in the reference sequence.
#[derive(Debug, Clone)]
pub struct IllegalSequenceRule {
    sequence: Sequence,
    window: usize,
    forward: String,
    backward: Option<String>,
    ignore_case: bool,
    report_all: bool,
}

impl IllegalSequenceRule {
    /// Window of 5, no wrap, reverse matching on.
    pub fn new(sequence: Sequence) -> Result<Self, ConfigError> {
        Self::with_options(sequence, DEFAULT_WINDOW, false, true)
    }

    /// `wrap` makes the sequence circular (`...89` continues with `01...`);
    /// `reverse` also matches the sequence read backwards.
    pub fn with_options(
        sequence: Sequence,
        window: usize,
        wrap: bool,
        reverse: bool,
    ) -> Result<Self, ConfigError> {
        let len = sequence.characters.chars().count();
        if window < MIN_WINDOW || window > len {
            return Err(ConfigError::InvalidSequenceWindow {
                length: window,
                max: len,
            });
        }

        let mut forward = sequence.characters.clone();
        if wrap {
            forward.extend(sequence.characters.chars().take(window - 1));
        }
        let backward = reverse.then(|| reversed(&forward));

        Ok(Self {
            sequence,
            window,
            forward,
            backward,
            ignore_case: false,
            report_all: true,
        })
    }

    /// Compare password and sequence in lower case.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        if ignore_case {
            self.forward = self.forward.to_lowercase();
            self.backward = self.backward.map(|b| b.to_lowercase());
        }
        self.ignore_case = ignore_case;
        self
    }

    /// When false only the first matching window is reported.
    pub fn with_report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn is_illegal(&self, window: &str) -> bool {
        self.forward.contains(window)
            || self
                .backward
                .as_deref()
                .is_some_and(|backward| backward.contains(window))
    }
}

impl Rule for IllegalSequenceRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let chars: Vec<char> = if self.ignore_case {
            data.cleartext().to_lowercase().chars().collect()
        } else {
            data.cleartext().chars().collect()
        };

        let mut reported: Vec<String> = Vec::new();
        for window in chars.windows(self.window) {
            let window: String = window.iter().collect();
            if !self.is_illegal(&window) || reported.contains(&window) {
                continue;
            }
            result.add_error(ILLEGAL_SEQUENCE, [("sequence", window.as_str())]);
            if !self.report_all {
                break;
            }
            reported.push(window);
        }
        result
    }
}
