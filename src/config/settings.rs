//! Runtime settings for the bank console
//!
//! Controls the prompt attempt limit, currency display, account number
//! prefix, and where the audit trail is written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BankError;

/// Length of the fixed branch prefix of every account number
pub const ACCOUNT_PREFIX_LEN: usize = 4;

/// Settings for a console session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Attempts allowed per prompt before the operation is aborted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Symbol printed in front of every amount
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Four digits that start every generated account number
    #[serde(default = "default_account_prefix")]
    pub account_prefix: String,

    /// Append audit entries to this file as JSON lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_account_prefix() -> String {
    "1234".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            currency_symbol: default_currency(),
            account_prefix: default_account_prefix(),
            audit_log: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, BankError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BankError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            BankError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can drive a session
    pub fn validate(&self) -> Result<(), BankError> {
        if self.max_attempts == 0 {
            return Err(BankError::Config(
                "max_attempts must be at least 1".into(),
            ));
        }

        if self.account_prefix.len() != ACCOUNT_PREFIX_LEN
            || !self.account_prefix.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(BankError::Config(format!(
                "account_prefix must be {} digits, got '{}'",
                ACCOUNT_PREFIX_LEN, self.account_prefix
            )));
        }

        Ok(())
    }
}
