//! Audit logger for the session's audit trail
//!
//! Entries are always kept in memory. With a log path configured, each entry
//! is also appended to that file as a single JSON line and flushed at once.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::{BankError, BankResult};
use crate::models::AccountNumber;

use super::entry::{AuditEntry, AuditEvent};

/// Records audit entries for one console session
#[derive(Debug)]
pub struct AuditLogger {
    session_id: Uuid,
    /// JSON lines file to append to, if any
    log_path: Option<PathBuf>,
    entries: Vec<AuditEntry>,
}

impl AuditLogger {
    /// Create a logger for a new session, optionally backed by a file
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            log_path,
            entries: Vec::new(),
        }
    }

    /// Create a logger that keeps entries in memory only
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Start an entry stamped with this session's id
    pub fn entry(&self, event: AuditEvent, account: Option<&AccountNumber>) -> AuditEntry {
        AuditEntry::new(self.session_id, event, account)
    }

    /// Record an entry, appending it to the log file when one is configured
    pub fn record(&mut self, entry: AuditEntry) -> BankResult<()> {
        if let Some(path) = &self.log_path {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    BankError::Io(format!("Failed to open audit log: {}", e))
                })?;

            let json = serde_json::to_string(&entry).map_err(|e| {
                BankError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| {
                    BankError::Io(format!("Failed to write audit entry: {}", e))
                })?;

            file.flush()
                .map_err(|e| {
                    BankError::Io(format!("Failed to flush audit log: {}", e))
                })?;
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Entries recorded during this session, oldest first
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Read every entry from the log file, including earlier sessions
    ///
    /// Without a log file this returns the in-memory entries.
    pub fn read_all(&self) -> BankResult<Vec<AuditEntry>> {
        let path = match &self.log_path {
            Some(path) => path,
            None => return Ok(self.entries.clone()),
        };

        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)
            .map_err(|e| {
                BankError::Io(format!("Failed to open audit log: {}", e))
            })?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                BankError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BankError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries
    pub fn read_recent(&self, count: usize) -> BankResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.log_path.as_ref()
    }
}
