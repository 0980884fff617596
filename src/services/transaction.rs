//! Transaction service
//!
//! Deposits and withdrawals against a single account.

use crate::audit::AuditEvent;
use crate::error::{BankError, BankResult};
use crate::models::{AccountNumber, Money};
use crate::storage::Storage;
use crate::validation;

/// Service for single-account balance changes
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Deposit a positive amount, returning the new balance
    pub fn deposit(&mut self, number: &AccountNumber, amount: Money) -> BankResult<Money> {
        ensure_positive(amount)?;

        let account = self
            .storage
            .accounts
            .get_mut(number.as_str())
            .ok_or_else(|| BankError::account_not_found(number.as_str()))?;

        let balance = account.credit(amount).ok_or_else(|| {
            BankError::Validation(format!("Deposit of {} would overflow the balance", amount))
        })?;

        let entry = self
            .storage
            .audit_entry(AuditEvent::Deposit, Some(number))
            .with_amount(amount)
            .with_balance_after(balance);
        self.storage.log(entry)?;

        Ok(balance)
    }

    /// Withdraw a positive amount, returning the new balance
    ///
    /// Amounts above the balance are refused and leave it unchanged.
    pub fn withdraw(&mut self, number: &AccountNumber, amount: Money) -> BankResult<Money> {
        ensure_positive(amount)?;

        let account = self
            .storage
            .accounts
            .get_mut(number.as_str())
            .ok_or_else(|| BankError::account_not_found(number.as_str()))?;

        let available = account.balance;
        let Some(balance) = account.debit(amount) else {
            let entry = self
                .storage
                .audit_entry(AuditEvent::Rejected, Some(number))
                .with_amount(amount)
                .with_balance_after(available)
                .with_detail("Withdrawal exceeds balance");
            self.storage.log(entry)?;

            return Err(BankError::InsufficientFunds {
                needed: amount,
                available,
            });
        };

        let entry = self
            .storage
            .audit_entry(AuditEvent::Withdrawal, Some(number))
            .with_amount(amount)
            .with_balance_after(balance);
        self.storage.log(entry)?;

        Ok(balance)
    }
}

pub(crate) fn ensure_positive(amount: Money) -> BankResult<()> {
    if validation::valid_amount(&amount) {
        Ok(())
    } else {
        Err(BankError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )))
    }
}
