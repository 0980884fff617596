//! Audit trail for the bank console
//!
//! Records every signup, login attempt, step-up failure and balance change
//! with a timestamp and the session that produced it.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single event with the accounts and amounts involved.
//! - `AuditLogger`: keeps the session's entries in memory and, when a log
//!   path is configured, appends each one to that file as a JSON line.
//!
//! # Example
//!
//! ```rust,ignore
//! use bank::audit::{AuditEvent, AuditLogger};
//!
//! let mut logger = AuditLogger::new(Some(audit_log_path));
//! let entry = logger
//!     .entry(AuditEvent::Deposit, Some(&account.number))
//!     .with_amount(amount)
//!     .with_balance_after(account.balance);
//! logger.record(entry)?;
//! ```
//!
//! Passwords never reach the audit trail: `Account` skips its password when
//! serialized and no entry field carries one.

mod entry;
mod logger;

pub use entry::{AuditEntry, AuditEvent};
pub use logger::AuditLogger;
