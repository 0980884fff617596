//! Display formatting for terminal output

pub mod account;

pub use account::format_dashboard_header;
