//! Storage layer for the bank console
//!
//! Account state lives only in memory for the lifetime of the process.
//! `Storage` owns the account repository together with the audit trail so
//! services can mutate balances and record what happened in one place.

pub mod accounts;

pub use accounts::AccountRepository;

use crate::audit::{AuditEntry, AuditEvent, AuditLogger};
use crate::config::Settings;
use crate::error::BankResult;
use crate::models::AccountNumber;

/// Main storage coordinator
#[derive(Debug)]
pub struct Storage {
    pub accounts: AccountRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create empty storage, auditing to the file named in the settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            accounts: AccountRepository::new(),
            audit: AuditLogger::new(settings.audit_log.clone()),
        }
    }

    /// Create empty storage with an in-memory audit trail
    pub fn in_memory() -> Self {
        Self {
            accounts: AccountRepository::new(),
            audit: AuditLogger::in_memory(),
        }
    }

    /// Start an audit entry for this session
    pub fn audit_entry(&self, event: AuditEvent, account: Option<&AccountNumber>) -> AuditEntry {
        self.audit.entry(event, account)
    }

    /// Record an audit entry
    pub fn log(&mut self, entry: AuditEntry) -> BankResult<()> {
        self.audit.record(entry)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let storage = Storage::in_memory();
        assert_eq!(storage.accounts.count(), 0);
        assert!(storage.audit().entries().is_empty());
    }

    #[test]
    fn test_storage_audits_to_configured_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            audit_log: Some(temp_dir.path().join("audit.log")),
            ..Settings::default()
        };
        let mut storage = Storage::new(&settings);

        let entry = storage.audit_entry(AuditEvent::LoginFailed, None);
        storage.log(entry).unwrap();

        assert!(temp_dir.path().join("audit.log").exists());
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }
}
