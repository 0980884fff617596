//! Account repository
//!
//! In-memory mapping from account number to account record.

use std::collections::HashMap;

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber};

/// Repository for account records
#[derive(Debug, Default)]
pub struct AccountRepository {
    data: HashMap<AccountNumber, Account>,
}

impl AccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an account by number
    pub fn get(&self, number: &str) -> Option<&Account> {
        self.data.get(number)
    }

    pub(crate) fn get_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.data.get_mut(number)
    }

    /// Insert a new account; an existing number is never overwritten
    pub fn insert(&mut self, account: Account) -> BankResult<()> {
        if self.data.contains_key(&account.number) {
            return Err(BankError::Duplicate {
                entity_type: "Account",
                identifier: account.number.to_string(),
            });
        }

        self.data.insert(account.number.clone(), account);
        Ok(())
    }

    /// Check if an account exists
    pub fn exists(&self, number: &str) -> bool {
        self.data.contains_key(number)
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }
}
