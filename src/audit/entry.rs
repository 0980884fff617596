//! Audit entry data structures
//!
//! Defines the audited event kinds and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AccountNumber, Money};

/// Kinds of events recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    /// A new account was opened
    Signup,
    /// Login succeeded
    Login,
    /// Login failed (unknown number or wrong password)
    LoginFailed,
    /// The holder left the dashboard
    Logout,
    /// Step-up password verification ran out of attempts
    VerificationFailed,
    Deposit,
    Withdrawal,
    Transfer,
    /// A withdrawal or transfer was refused by a business rule
    Rejected,
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditEvent::Signup => write!(f, "SIGNUP"),
            AuditEvent::Login => write!(f, "LOGIN"),
            AuditEvent::LoginFailed => write!(f, "LOGIN_FAILED"),
            AuditEvent::Logout => write!(f, "LOGOUT"),
            AuditEvent::VerificationFailed => write!(f, "VERIFICATION_FAILED"),
            AuditEvent::Deposit => write!(f, "DEPOSIT"),
            AuditEvent::Withdrawal => write!(f, "WITHDRAWAL"),
            AuditEvent::Transfer => write!(f, "TRANSFER"),
            AuditEvent::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Console session that produced the event
    pub session_id: Uuid,

    pub event: AuditEvent,

    /// Account the event applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountNumber>,

    /// Other side of a transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountNumber>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Balance of `account` once the event was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<Money>,

    /// JSON snapshot of the account (for signups)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,

    /// Human-readable detail, e.g. the reason for a rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create an entry for `event` with no amounts attached
    pub fn new(session_id: Uuid, event: AuditEvent, account: Option<&AccountNumber>) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            event,
            account: account.cloned(),
            counterparty: None,
            amount: None,
            balance_after: None,
            snapshot: None,
            detail: None,
        }
    }

    pub fn with_counterparty(mut self, counterparty: &AccountNumber) -> Self {
        self.counterparty = Some(counterparty.clone());
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_balance_after(mut self, balance: Money) -> Self {
        self.balance_after = Some(balance);
        self
    }

    pub fn with_snapshot<T: Serialize>(mut self, entity: &T) -> Self {
        self.snapshot = serde_json::to_value(entity).ok();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event
        );

        if let Some(account) = &self.account {
            output.push_str(&format!(" {}", account));
        }

        if let Some(amount) = self.amount {
            output.push_str(&format!(" {}", amount));
        }

        if let Some(counterparty) = &self.counterparty {
            output.push_str(&format!(" -> {}", counterparty));
        }

        if let Some(balance) = self.balance_after {
            output.push_str(&format!(" (balance {})", balance));
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!("\n  {}", detail));
        }

        output
    }
}
