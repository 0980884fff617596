//! Field validation rules
//!
//! Plain predicates shared by the console prompts and the service layer.

use crate::models::Money;

/// Customers must be strictly older than this
pub const MIN_AGE_EXCLUSIVE: u32 = 18;

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MOBILE_LEN: usize = 10;

pub const ACCOUNT_NUMBER_LEN: usize = 16;

/// Non-empty, ASCII letters and whitespace only
pub fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

pub fn valid_mobile(mobile: &str) -> bool {
    is_digits_of_len(mobile, MOBILE_LEN)
}

pub fn valid_age(age: &u32) -> bool {
    *age > MIN_AGE_EXCLUSIVE
}

pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn valid_account_number(number: &str) -> bool {
    is_digits_of_len(number, ACCOUNT_NUMBER_LEN)
}

pub fn valid_amount(amount: &Money) -> bool {
    amount.is_positive()
}

fn is_digits_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(valid_name("Alice"));
        assert!(valid_name("Mary Jane"));
        assert!(valid_name(" Bob\t"));
        assert!(valid_name("   "));

        assert!(!valid_name(""));
        assert!(!valid_name("R2D2"));
        assert!(!valid_name("O'Brien"));
        assert!(!valid_name("José"));
    }

    #[test]
    fn test_valid_mobile() {
        assert!(valid_mobile("1234567890"));
        assert!(!valid_mobile("123456789"));
        assert!(!valid_mobile("12345678901"));
        assert!(!valid_mobile("12345abcde"));
        assert!(!valid_mobile("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn test_valid_age() {
        assert!(valid_age(&19));
        assert!(valid_age(&120));
        assert!(!valid_age(&18));
        assert!(!valid_age(&0));
    }

    #[test]
    fn test_valid_password() {
        assert!(valid_password("secret"));
        assert!(valid_password("!@#$%^&*"));
        assert!(valid_password("ünïcød"));
        assert!(!valid_password("short"));
        assert!(!valid_password(""));
    }

    #[test]
    fn test_valid_account_number() {
        assert!(valid_account_number("1234000000000000"));
        assert!(!valid_account_number("123400000000000"));
        assert!(!valid_account_number("12340000000000000"));
        assert!(!valid_account_number("1234-00000000000"));
    }

    #[test]
    fn test_valid_amount() {
        assert!(valid_amount(&Money::from_cents(1)));
        assert!(!valid_amount(&Money::zero()));
        assert!(!valid_amount(&Money::from_cents(-500)));
    }
}
