//! Username rule - the password must not contain the username.

use super::{Rule, reversed};
use crate::codes::{ILLEGAL_USERNAME, ILLEGAL_USERNAME_REVERSED};
use crate::data::{PasswordData, RuleResult};

/// Rejects passwords containing the username, optionally also reversed.
/// Passes when no username is supplied.
#[derive(Debug, Clone, Default)]
pub struct UsernameRule {
    match_backwards: bool,
    ignore_case: bool,
}

impl UsernameRule {
    pub fn new(match_backwards: bool, ignore_case: bool) -> Self {
        Self {
            match_backwards,
            ignore_case,
        }
    }
}

impl Rule for UsernameRule {
    fn validate(&self, data: &PasswordData) -> RuleResult {
        let mut result = RuleResult::valid();
        let Some(username) = data.username().filter(|u| !u.is_empty()) else {
            return result;
        };

        let (text, user) = if self.ignore_case {
            (data.cleartext().to_lowercase(), username.to_lowercase())
        } else {
            (data.cleartext().to_string(), username.to_string())
        };

        if text.contains(&user) {
            result.add_error(ILLEGAL_USERNAME, [("username", username)]);
        }
        if self.match_backwards && text.contains(&reversed(&user)) {
            result.add_error(ILLEGAL_USERNAME_REVERSED, [("username", username)]);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(result: &RuleResult) -> Vec<&str> {
        result.details().iter().map(|d| d.error_code()).collect()
    }

    #[test]
    fn test_username_contained() {
        let rule = UsernameRule::default();
        let data = PasswordData::new("xxalice99").with_username("alice");
        assert_eq!(codes(&rule.validate(&data)), vec![ILLEGAL_USERNAME]);
    }

    #[test]
    fn test_username_case_sensitivity() {
        let data = PasswordData::new("ALICE2024").with_username("alice");
        assert!(UsernameRule::new(false, false).validate(&data).is_valid());
        assert!(!UsernameRule::new(false, true).validate(&data).is_valid());
    }

    #[test]
    fn test_username_reversed() {
        let data = PasswordData::new("ecila!!").with_username("alice");
        assert!(UsernameRule::new(false, false).validate(&data).is_valid());
        assert_eq!(
            codes(&UsernameRule::new(true, false).validate(&data)),
            vec![ILLEGAL_USERNAME_REVERSED]
        );
    }

    #[test]
    fn test_username_missing() {
        let rule = UsernameRule::new(true, true);
        assert!(rule.validate(&PasswordData::new("anything")).is_valid());
        assert!(rule.validate(&PasswordData::new("anything").with_username("")).is_valid());
    }
}
