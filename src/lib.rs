//! bank-cli - Interactive console banking
//!
//! This library provides the core functionality for a small in-memory bank:
//! customers sign up for an account, log in, and then deposit, withdraw, or
//! transfer money between accounts from a text menu.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Session settings
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, money)
//! - `validation`: Field validation rules
//! - `storage`: In-memory account repository
//! - `services`: Business logic layer
//! - `audit`: Audit trail of every balance change and login
//! - `display`: Dashboard formatting
//! - `cli`: Menu-driven console
//!
//! # Example
//!
//! ```rust,ignore
//! use bank::cli::{BankApp, Terminal};
//! use bank::config::Settings;
//!
//! let stdin = std::io::stdin();
//! let terminal = Terminal::new(stdin.lock(), std::io::stdout());
//! BankApp::new(terminal, Settings::default()).run()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{BankError, BankResult};
