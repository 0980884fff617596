//! Account model
//!
//! A customer's account record, keyed by a 16-digit account number.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::validation;

/// Random digits appended to the branch prefix
const RANDOM_DIGITS: u32 = 12;

/// A 16-digit account number
///
/// Only constructible through [`AccountNumber::parse`] or
/// [`AccountNumber::generate`], so every value is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Parse an account number, requiring exactly 16 ASCII digits
    pub fn parse(s: &str) -> Result<Self, AccountValidationError> {
        if validation::valid_account_number(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AccountValidationError::InvalidAccountNumber(s.to_string()))
        }
    }

    /// Generate a number from a 4-digit prefix and 12 zero-padded random digits
    pub fn generate<R: Rng + ?Sized>(
        prefix: &str,
        rng: &mut R,
    ) -> Result<Self, AccountValidationError> {
        let suffix = rng.gen_range(0..10u64.pow(RANDOM_DIGITS));
        Self::parse(&format!(
            "{}{:0width$}",
            prefix,
            suffix,
            width = RANDOM_DIGITS as usize
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The details collected at signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub mobile: String,
    pub age: u32,
    pub nominee: String,
    pub password: String,
}

impl NewAccount {
    /// Validate every field against the signup rules
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if !validation::valid_name(&self.name) {
            return Err(AccountValidationError::InvalidName);
        }
        if !validation::valid_mobile(&self.mobile) {
            return Err(AccountValidationError::InvalidMobile);
        }
        if !validation::valid_age(&self.age) {
            return Err(AccountValidationError::Underage(self.age));
        }
        if !validation::valid_name(&self.nominee) {
            return Err(AccountValidationError::InvalidNominee);
        }
        if !validation::valid_password(&self.password) {
            return Err(AccountValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// A customer account
///
/// The password is kept verbatim for comparison and is never serialized,
/// so audit snapshots of an account cannot leak it.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub number: AccountNumber,
    pub name: String,
    pub mobile: String,
    pub age: u32,
    pub nominee: String,
    #[serde(skip_serializing)]
    password: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Open a new account with a zero balance
    pub fn open(number: AccountNumber, details: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            number,
            name: details.name,
            mobile: details.mobile,
            age: details.age,
            nominee: details.nominee,
            password: details.password,
            balance: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Exact, case-sensitive password comparison
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Add to the balance, returning the new balance, or `None` on overflow
    pub fn credit(&mut self, amount: Money) -> Option<Money> {
        self.balance = self.balance.checked_add(amount)?;
        self.updated_at = Utc::now();
        Some(self.balance)
    }

    /// Subtract from the balance, returning `None` if it would go negative
    pub fn debit(&mut self, amount: Money) -> Option<Money> {
        if amount > self.balance {
            return None;
        }
        self.balance = self.balance.checked_sub(amount)?;
        self.updated_at = Utc::now();
        Some(self.balance)
    }
}

/// Validation errors for account data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    InvalidName,
    InvalidNominee,
    InvalidMobile,
    Underage(u32),
    PasswordTooShort,
    InvalidAccountNumber(String),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => {
                write!(f, "Name should only contain alphabetic characters")
            }
            Self::InvalidNominee => {
                write!(f, "Nominee name should only contain alphabetic characters")
            }
            Self::InvalidMobile => write!(f, "Mobile number should be 10 digits"),
            Self::Underage(age) => {
                write!(f, "Age {} is too young, must be above 18", age)
            }
            Self::PasswordTooShort => {
                write!(f, "Password must be at least 6 characters")
            }
            Self::InvalidAccountNumber(s) => {
                write!(f, "Invalid account number '{}', expected 16 digits", s)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
