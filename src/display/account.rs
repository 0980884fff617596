//! Account display formatting
//!
//! Formats the dashboard banner shown after login.

use crate::models::Account;

/// Format the dashboard banner: holder name and current balance
pub fn format_dashboard_header(account: &Account, currency_symbol: &str) -> String {
    format!(
        "\nAccount Dashboard for {}\nAccount Balance: {}",
        account.name,
        account.balance.format_with_symbol(currency_symbol)
    )
}
