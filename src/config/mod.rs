//! Configuration module for the bank console
//!
//! Settings come from built-in defaults, an optional JSON file, and finally
//! command-line overrides applied by the binary.

pub mod settings;

pub use settings::Settings;
