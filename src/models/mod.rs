//! Core data models for the bank console
//!
//! Accounts, their numbers, and the money amounts they hold.

pub mod account;
pub mod money;

pub use account::{Account, AccountNumber, AccountValidationError, NewAccount};
pub use money::{Money, MoneyParseError};
