//! Confirmation code generation.

use std::sync::Arc;

use rand::Rng;

use parish_core::traits::Clock;
use parish_database::CodeSource;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Render `value` in upper-case base 36.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Builds codes shaped `PREFIX-TIMESTAMP36-RANDOM`.
///
/// Uniqueness is enforced by the store; this only makes collisions rare.
#[derive(Clone)]
pub struct ConfirmationCodeGenerator {
    prefix: String,
    suffix_length: usize,
    clock: Arc<dyn Clock>,
}

impl ConfirmationCodeGenerator {
    /// Creates a new generator. The prefix is upper-cased and stripped of
    /// anything outside `A-Z0-9`.
    pub fn new(prefix: &str, suffix_length: usize, clock: Arc<dyn Clock>) -> Self {
        let prefix: String = prefix
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self {
            prefix: if prefix.is_empty() {
                "MISA".to_string()
            } else {
                prefix
            },
            suffix_length: suffix_length.max(1),
            clock,
        }
    }

    /// Generate a code.
    pub fn generate(&self) -> String {
        let millis = self.clock.now().timestamp_millis().max(0) as u64;
        let mut rng = rand::rng();
        let suffix: String = (0..self.suffix_length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        format!("{}-{}-{}", self.prefix, to_base36(millis), suffix)
    }
}

impl CodeSource for ConfirmationCodeGenerator {
    fn next_code(&self) -> String {
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use parish_core::traits::FixedClock;

    use super::*;

    fn is_code_shape(code: &str, prefix: &str) -> bool {
        let parts: Vec<&str> = code.split('-').collect();
        parts.len() == 3
            && parts[0] == prefix
            && parts[1..].iter().all(|p| {
                !p.is_empty()
                    && p.chars()
                        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            })
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_296), "100");
    }

    #[test]
    fn test_code_shape() {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid"),
        ));
        let generator = ConfirmationCodeGenerator::new("misa", 5, clock);
        let code = generator.generate();
        assert!(is_code_shape(&code, "MISA"), "{code}");
        assert_eq!(code.rsplit('-').next().map(str::len), Some(5));
    }

    #[test]
    fn test_codes_in_the_same_millisecond_differ() {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let generator = ConfirmationCodeGenerator::new("MISA", 8, clock);
        let codes: HashSet<String> = (0..200).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 200);
    }

    #[test]
    fn test_prefix_is_sanitized() {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let code = ConfirmationCodeGenerator::new("st-jo", 4, clock.clone()).generate();
        assert!(code.starts_with("STJO-"));
        let code = ConfirmationCodeGenerator::new("--", 4, clock).generate();
        assert!(code.starts_with("MISA-"));
    }
}
