//! Password generator - synthesizes passwords that satisfy a set of
//! character rule minimums.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use secrecy::SecretString;

use crate::error::ConfigError;
use crate::rules::{CharacterRule, char_set};

/// Generates passwords from a cryptographically strong random source.
///
/// The source is owned by the generator, so a generator serves one caller
/// at a time; give each thread its own instance.
///
/// ```
/// use pwd_policy::{CharacterData, CharacterRule, PasswordGenerator};
/// use secrecy::ExposeSecret;
///
/// let rules = [
///     CharacterRule::new(CharacterData::upper_case(), 1).unwrap(),
///     CharacterRule::new(CharacterData::digit(), 2).unwrap(),
/// ];
/// let password = PasswordGenerator::new().generate(10, &rules).unwrap();
/// assert_eq!(password.expose_secret().chars().count(), 10);
/// ```
#[derive(Debug)]
pub struct PasswordGenerator<R = OsRng> {
    rng: R,
}

impl PasswordGenerator<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for PasswordGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> PasswordGenerator<R> {
    /// Uses the given source, e.g. a seeded one for reproducible output.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a password of exactly `length` chars containing at least
    /// each rule's minimum of that rule's characters.
    ///
    /// Mandatory chars are drawn per rule, the rest uniformly from the
    /// deduplicated union of all rule classes, then the whole buffer is
    /// shuffled.
    pub fn generate(
        &mut self,
        length: usize,
        rules: &[CharacterRule],
    ) -> Result<SecretString, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        let required = rules
            .iter()
            .try_fold(0usize, |sum, rule| sum.checked_add(rule.minimum()))
            .ok_or(ConfigError::LengthBelowMinimums {
                length,
                required: usize::MAX,
            })?;
        if length < required {
            return Err(ConfigError::LengthBelowMinimums { length, required });
        }

        let mut buffer: Vec<char> = Vec::with_capacity(length);
        for rule in rules {
            let pool = rule.data().characters();
            for _ in 0..rule.minimum() {
                buffer.push(self.pick(pool));
            }
        }

        let union = char_set(
            rules
                .iter()
                .flat_map(|r| r.data().characters().iter().copied()),
        );
        for _ in required..length {
            buffer.push(self.pick(&union));
        }

        buffer.shuffle(&mut self.rng);

        #[cfg(feature = "tracing")]
        tracing::debug!(length, required, pool = union.len(), "password generated");

        Ok(SecretString::new(buffer.into_iter().collect::<String>().into_boxed_str()))
    }

    fn pick(&mut self, pool: &[char]) -> char {
        pool[self.rng.gen_range(0..pool.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PasswordData;
    use crate::rules::{CharacterData, Rule};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secrecy::ExposeSecret;

    fn four_classes() -> Vec<CharacterRule> {
        vec![
            CharacterRule::new(CharacterData::upper_case(), 1).unwrap(),
            CharacterRule::new(CharacterData::lower_case(), 1).unwrap(),
            CharacterRule::new(CharacterData::digit(), 1).unwrap(),
            CharacterRule::new(CharacterData::special(), 1).unwrap(),
        ]
    }

    #[test]
    fn test_generate_four_classes() {
        let rules = four_classes();
        let mut generator = PasswordGenerator::new();
        let first = generator.generate(12, &rules).unwrap();
        let second = generator.generate(12, &rules).unwrap();

        let password = first.expose_secret();
        assert_eq!(password.chars().count(), 12);
        for rule in &rules {
            assert!(rule.data().count_in(password) >= 1, "missing {}", rule.data().error_code());
        }
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_generate_length_equals_minimums() {
        let rules = vec![
            CharacterRule::new(CharacterData::digit(), 3).unwrap(),
            CharacterRule::new(CharacterData::upper_case(), 2).unwrap(),
        ];
        let mut generator = PasswordGenerator::with_rng(StdRng::seed_from_u64(7));
        let password = generator.generate(5, &rules).unwrap();
        let password = password.expose_secret();
        assert_eq!(CharacterData::digit().count_in(password), 3);
        assert_eq!(CharacterData::upper_case().count_in(password), 2);
    }

    #[test]
    fn test_generate_seeded_is_reproducible() {
        let rules = four_classes();
        let a = PasswordGenerator::with_rng(StdRng::seed_from_u64(42))
            .generate(16, &rules)
            .unwrap();
        let b = PasswordGenerator::with_rng(StdRng::seed_from_u64(42))
            .generate(16, &rules)
            .unwrap();
        assert_eq!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_generate_overlapping_classes_draw_from_union() {
        let rules = vec![
            CharacterRule::new(CharacterData::alphabetical(), 1).unwrap(),
            CharacterRule::new(CharacterData::lower_case(), 1).unwrap(),
        ];
        let mut generator = PasswordGenerator::with_rng(StdRng::seed_from_u64(1));
        let password = generator.generate(20, &rules).unwrap();
        assert!(password.expose_secret().chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_generate_configuration_errors() {
        let mut generator = PasswordGenerator::new();
        assert_eq!(
            generator.generate(3, &four_classes()).unwrap_err(),
            ConfigError::LengthBelowMinimums {
                length: 3,
                required: 4
            }
        );
        assert_eq!(generator.generate(0, &four_classes()).unwrap_err(), ConfigError::ZeroLength);
        assert_eq!(generator.generate(8, &[]).unwrap_err(), ConfigError::EmptyRuleSet);
    }

    #[test]
    fn test_generate_overflowing_minimums() {
        let huge = usize::MAX / 2 + 1;
        let rules = vec![
            CharacterRule::new(CharacterData::digit(), huge).unwrap(),
            CharacterRule::new(CharacterData::upper_case(), huge).unwrap(),
        ];
        let mut generator = PasswordGenerator::new();
        assert_eq!(
            generator.generate(64, &rules).unwrap_err(),
            ConfigError::LengthBelowMinimums {
                length: 64,
                required: usize::MAX
            }
        );
    }

    proptest! {
        #[test]
        fn generated_password_satisfies_every_rule(
            seed in any::<u64>(),
            upper in 1usize..4,
            digit in 1usize..4,
            special in 1usize..4,
            extra in 0usize..10,
        ) {
            let rules = vec![
                CharacterRule::new(CharacterData::upper_case(), upper).unwrap(),
                CharacterRule::new(CharacterData::digit(), digit).unwrap(),
                CharacterRule::new(CharacterData::special(), special).unwrap(),
            ];
            let length = upper + digit + special + extra;
            let password = PasswordGenerator::with_rng(StdRng::seed_from_u64(seed))
                .generate(length, &rules)
                .unwrap();
            let data = PasswordData::from_secret(password);

            prop_assert_eq!(data.password().expose_secret().chars().count(), length);
            for rule in &rules {
                prop_assert!(rule.validate(&data).is_valid());
            }
        }
    }
}
