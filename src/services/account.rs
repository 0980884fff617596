//! Account service
//!
//! Provides business logic for opening accounts, login, and step-up
//! password verification.

use rand::Rng;

use crate::audit::AuditEvent;
use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber, NewAccount};
use crate::storage::Storage;

/// Give up generating numbers after this many collisions in a row
const MAX_NUMBER_ATTEMPTS: usize = 1000;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a mut Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Open a new account with a zero balance
    ///
    /// The number is `prefix` followed by 12 random digits. Numbers already
    /// in use are drawn again, so an existing account is never replaced.
    pub fn signup<R: Rng + ?Sized>(
        &mut self,
        details: NewAccount,
        prefix: &str,
        rng: &mut R,
    ) -> BankResult<Account> {
        details
            .validate()
            .map_err(|e| BankError::Validation(e.to_string()))?;

        let number = self.generate_unused_number(prefix, rng)?;
        let account = Account::open(number, details);
        self.storage.accounts.insert(account.clone())?;

        let entry = self
            .storage
            .audit_entry(AuditEvent::Signup, Some(&account.number))
            .with_snapshot(&account);
        self.storage.log(entry)?;

        Ok(account)
    }

    fn generate_unused_number<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        rng: &mut R,
    ) -> BankResult<AccountNumber> {
        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let number = AccountNumber::generate(prefix, rng)
                .map_err(|e| BankError::Config(e.to_string()))?;
            if !self.storage.accounts.exists(number.as_str()) {
                return Ok(number);
            }
        }

        Err(BankError::Duplicate {
            entity_type: "Account",
            identifier: format!("{} (no unused number found)", prefix),
        })
    }

    /// Log in with an account number and password
    ///
    /// Unknown numbers and wrong passwords fail the same way.
    pub fn authenticate(&mut self, number: &str, password: &str) -> BankResult<Account> {
        let found = self
            .storage
            .accounts
            .get(number)
            .filter(|account| account.password_matches(password))
            .cloned();

        match found {
            Some(account) => {
                let entry = self
                    .storage
                    .audit_entry(AuditEvent::Login, Some(&account.number));
                self.storage.log(entry)?;
                Ok(account)
            }
            None => {
                let entry = self
                    .storage
                    .audit_entry(AuditEvent::LoginFailed, None)
                    .with_detail(format!("account number {}", number));
                self.storage.log(entry)?;
                Err(BankError::InvalidCredentials)
            }
        }
    }

    /// Check a step-up password for an already logged-in account
    pub fn verify_password(&self, number: &str, password: &str) -> bool {
        self.storage
            .accounts
            .get(number)
            .is_some_and(|account| account.password_matches(password))
    }

    /// Record that step-up verification ran out of attempts
    pub fn record_verification_failure(&mut self, number: &AccountNumber) -> BankResult<()> {
        let entry = self
            .storage
            .audit_entry(AuditEvent::VerificationFailed, Some(number));
        self.storage.log(entry)
    }

    /// Record that the holder logged out
    pub fn logout(&mut self, number: &AccountNumber) -> BankResult<()> {
        let entry = self.storage.audit_entry(AuditEvent::Logout, Some(number));
        self.storage.log(entry)
    }

    /// Get an account by number
    pub fn get(&self, number: &str) -> Option<Account> {
        self.storage.accounts.get(number).cloned()
    }

    pub fn exists(&self, number: &str) -> bool {
        self.storage.accounts.exists(number)
    }
}
