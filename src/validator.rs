//! Password validator - applies a rule list and aggregates the results.

use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::data::{PasswordData, RuleResult};
use crate::messages::{CatalogMessageResolver, MessageResolver};
use crate::rules::Rule;

/// Ordered list of rules evaluated together against one password.
///
/// Every rule runs on every call; the combined result is valid only when
/// all rules pass, and its details keep rule order.
///
/// ```rust
/// use std::sync::Arc;
/// use pwd_policy::codes::{ILLEGAL_WHITESPACE, TOO_SHORT};
/// use pwd_policy::{LengthRule, PasswordData, PasswordValidator, WhitespaceRule};
///
/// let validator = PasswordValidator::new(vec![
///     Arc::new(LengthRule::new(8, 16).unwrap()),
///     Arc::new(WhitespaceRule::default()),
/// ]);
///
/// let result = validator.validate(&PasswordData::new("a b"));
/// let codes: Vec<_> = result.details().iter().map(|d| d.error_code()).collect();
/// assert_eq!(codes, vec![TOO_SHORT, ILLEGAL_WHITESPACE]);
/// assert!(validator.validate(&PasswordData::new("correct-horse")).is_valid());
/// ```
#[derive(Clone)]
pub struct PasswordValidator {
    rules: Vec<Arc<dyn Rule>>,
    messages: Arc<dyn MessageResolver>,
}

impl PasswordValidator {
    pub fn new(rules: Vec<Arc<dyn Rule>>) -> Self {
        Self::with_resolver(rules, Arc::new(CatalogMessageResolver::default()))
    }

    pub fn with_resolver(rules: Vec<Arc<dyn Rule>>, messages: Arc<dyn MessageResolver>) -> Self {
        Self { rules, messages }
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Evaluates every rule in order and concatenates their details.
    pub fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        for rule in &self.rules {
            result.merge(rule.validate(data));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rules = self.rules.len(),
            violations = result.details().len(),
            "password validated"
        );

        result
    }

    /// Display text for each detail, in detail order.
    pub fn get_messages(&self, result: &RuleResult) -> Vec<String> {
        result
            .details()
            .iter()
            .map(|detail| self.messages.resolve(detail))
            .collect()
    }

    /// Validates and sends the result over a channel.
    ///
    /// Nothing is evaluated or sent when `token` is already cancelled.
    #[cfg(feature = "async")]
    pub async fn validate_tx(
        &self,
        data: &PasswordData,
        token: CancellationToken,
        tx: mpsc::Sender<RuleResult>,
    ) {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("validation cancelled before start");
            return;
        }

        let result = self.validate(data);

        if let Err(e) = tx.send(result).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password validation result: {}", e);
            #[cfg(not(feature = "tracing"))]
            let _ = e;
        }
    }
}

impl std::fmt::Debug for PasswordValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordValidator")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::rules::LengthRule;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(vec![Arc::new(LengthRule::new(8, 64).unwrap())])
    }

    #[tokio::test]
    async fn test_validate_tx_sends_result() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        validator()
            .validate_tx(&PasswordData::new("short"), token, tx)
            .await;

        let result = rx.recv().await.expect("Should receive result");
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_validate_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        validator()
            .validate_tx(&PasswordData::new("LongEnough123!"), token, tx)
            .await;

        assert!(rx.recv().await.is_none());
    }
}
