//! Random password generation.
//!
//! Passwords are drawn from the union of the selected character classes,
//! with at least one character from every selected class, then shuffled.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::errors::{Result, SecurePassError};

const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBER_CHARS: &str = "0123456789";
const SYMBOL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
const AMBIGUOUS_CHARS: &str = "Il1O0";

/// Shortest password `generate` will produce.
pub const MIN_LENGTH: usize = 8;

/// Which characters a generated password may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_upper: bool,
    pub include_lower: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_ambiguous: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_upper: true,
            include_lower: true,
            include_numbers: true,
            include_symbols: true,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordOptions {
    /// The selected character classes, ambiguous characters removed if
    /// requested.  Classes left empty by the filter are dropped.
    fn classes(&self) -> Vec<Vec<char>> {
        [
            (self.include_lower, LOWER_CHARS),
            (self.include_upper, UPPER_CHARS),
            (self.include_numbers, NUMBER_CHARS),
            (self.include_symbols, SYMBOL_CHARS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, chars)| {
            chars
                .chars()
                .filter(|c| !(self.exclude_ambiguous && AMBIGUOUS_CHARS.contains(*c)))
                .collect::<Vec<char>>()
        })
        .filter(|class| !class.is_empty())
        .collect()
    }
}

/// Generate a password according to `opts`.
pub fn generate(opts: &PasswordOptions) -> Result<String> {
    if opts.length < MIN_LENGTH {
        return Err(SecurePassError::Generator(format!(
            "password length must be at least {MIN_LENGTH} characters"
        )));
    }

    let classes = opts.classes();
    if classes.is_empty() {
        return Err(SecurePassError::Generator(
            "at least one character type must be selected".into(),
        ));
    }

    let pool: Vec<char> = classes.iter().flatten().copied().collect();
    let mut rng = rand::rng();
    let mut password = Vec::with_capacity(opts.length);

    // One guaranteed character from each selected class.
    for class in &classes {
        if let Some(&c) = class.choose(&mut rng) {
            password.push(c);
        }
    }

    while password.len() < opts.length {
        password.push(pool[rng.random_range(0..pool.len())]);
    }

    password.shuffle(&mut rng);
    Ok(password.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_cover_every_class() {
        let pw = generate(&PasswordOptions::default()).unwrap();
        assert_eq!(pw.chars().count(), 16);
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
        assert!(pw.chars().any(|c| SYMBOL_CHARS.contains(c)));
    }

    #[test]
    fn rejects_short_length() {
        let opts = PasswordOptions {
            length: 7,
            ..PasswordOptions::default()
        };
        assert!(generate(&opts).is_err());
    }

    #[test]
    fn rejects_empty_charset() {
        let opts = PasswordOptions {
            include_upper: false,
            include_lower: false,
            include_numbers: false,
            include_symbols: false,
            ..PasswordOptions::default()
        };
        assert!(generate(&opts).is_err());
    }

    #[test]
    fn digits_only() {
        let opts = PasswordOptions {
            length: 32,
            include_upper: false,
            include_lower: false,
            include_symbols: false,
            ..PasswordOptions::default()
        };
        let pw = generate(&opts).unwrap();
        assert_eq!(pw.len(), 32);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn excludes_ambiguous_characters() {
        let opts = PasswordOptions {
            length: 200,
            exclude_ambiguous: true,
            ..PasswordOptions::default()
        };
        let pw = generate(&opts).unwrap();
        assert!(!pw.chars().any(|c| AMBIGUOUS_CHARS.contains(c)));
    }

    #[test]
    fn consecutive_passwords_differ() {
        let opts = PasswordOptions::default();
        assert_ne!(generate(&opts).unwrap(), generate(&opts).unwrap());
    }
}
