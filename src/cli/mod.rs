//! Interactive console
//!
//! This module contains the menu-driven front end, bridging line-based
//! terminal input with the service layer.

pub mod app;
pub mod menu;
pub mod prompt;

pub use app::BankApp;
pub use menu::{DashboardOption, MainMenuOption, MenuOption};
pub use prompt::{Terminal, ValidatedPrompt};
