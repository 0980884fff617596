//! Service layer for the bank console
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, balance rules, and audit logging.

pub mod account;
pub mod transaction;
pub mod transfer;

pub use account::AccountService;
pub use transaction::TransactionService;
pub use transfer::{TransferResult, TransferService};
