//! Transfer service
//!
//! Moves money between two accounts. Every check runs before either balance
//! is touched, so a transfer debits and credits together or not at all.

use crate::audit::AuditEvent;
use crate::error::{BankError, BankResult};
use crate::models::{AccountNumber, Money};
use crate::storage::Storage;

use super::transaction::ensure_positive;

/// Service for managing transfers between accounts
pub struct TransferService<'a> {
    storage: &'a mut Storage,
}

/// Result of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    pub amount: Money,
    /// Source balance after the debit
    pub from_balance: Money,
    /// Target balance after the credit
    pub to_balance: Money,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Transfer a positive amount from one account to another
    pub fn transfer(
        &mut self,
        from: &AccountNumber,
        to: &AccountNumber,
        amount: Money,
    ) -> BankResult<TransferResult> {
        ensure_positive(amount)?;

        if from == to {
            return Err(BankError::Validation(
                "Cannot transfer to the same account".into(),
            ));
        }

        let available = self
            .storage
            .accounts
            .get(from.as_str())
            .ok_or_else(|| BankError::account_not_found(from.as_str()))?
            .balance;

        let target_balance = self
            .storage
            .accounts
            .get(to.as_str())
            .ok_or_else(|| BankError::account_not_found(to.as_str()))?
            .balance;

        if amount > available {
            let entry = self
                .storage
                .audit_entry(AuditEvent::Rejected, Some(from))
                .with_counterparty(to)
                .with_amount(amount)
                .with_balance_after(available)
                .with_detail("Transfer exceeds balance");
            self.storage.log(entry)?;

            return Err(BankError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        if target_balance.checked_add(amount).is_none() {
            return Err(BankError::Validation(format!(
                "Transfer of {} would overflow the target balance",
                amount
            )));
        }

        let from_balance = self
            .storage
            .accounts
            .get_mut(from.as_str())
            .and_then(|account| account.debit(amount))
            .ok_or_else(|| BankError::account_not_found(from.as_str()))?;

        let to_balance = self
            .storage
            .accounts
            .get_mut(to.as_str())
            .and_then(|account| account.credit(amount))
            .ok_or_else(|| BankError::account_not_found(to.as_str()))?;

        let entry = self
            .storage
            .audit_entry(AuditEvent::Transfer, Some(from))
            .with_counterparty(to)
            .with_amount(amount)
            .with_balance_after(from_balance);
        self.storage.log(entry)?;

        Ok(TransferResult {
            amount,
            from_balance,
            to_balance,
        })
    }
}
