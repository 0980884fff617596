use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bank::audit::AuditLogger;
use bank::cli::{BankApp, Terminal};
use bank::config::Settings;

#[derive(Parser)]
#[command(
    name = "bank",
    version,
    about = "Interactive console banking",
    long_about = "A menu-driven bank console. Sign up for an account, log in, \
                  and deposit, withdraw, or transfer money. Accounts live only \
                  for the duration of the session."
)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, env = "BANK_CONFIG")]
    config: Option<PathBuf>,

    /// Append the audit trail to this file as JSON lines
    #[arg(long, env = "BANK_AUDIT_LOG")]
    audit_log: Option<PathBuf>,

    /// Attempts allowed per prompt
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Currency symbol shown in front of amounts
    #[arg(long)]
    currency: Option<String>,

    /// Print the last N audit log entries and exit
    #[arg(long, value_name = "N")]
    history: Option<usize>,

    /// Seed for account number generation
    #[arg(long, hide = true)]
    seed: Option<u64>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(path) = &self.audit_log {
            settings.audit_log = Some(path.clone());
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if let Some(currency) = &self.currency {
            settings.currency_symbol = currency.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    if let Some(count) = cli.history {
        return print_history(&settings, count);
    }

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let terminal =
        Terminal::new(stdin.lock(), std::io::stdout()).with_hidden_secrets(interactive);

    let mut app = BankApp::new(terminal, settings);
    if let Some(seed) = cli.seed {
        app = app.with_seed(seed);
    }

    app.run()?;
    Ok(())
}

fn print_history(settings: &Settings, count: usize) -> Result<()> {
    let path = settings
        .audit_log
        .clone()
        .context("--history needs an audit log (--audit-log or audit_log in the settings file)")?;

    let logger = AuditLogger::new(Some(path));
    for entry in logger.read_recent(count)? {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
