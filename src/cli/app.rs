//! Interactive console controller
//!
//! `BankApp` owns the session state and drives the two menus: signup, login
//! and exit at the top level, and the per-account dashboard after login.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::display::format_dashboard_header;
use crate::error::{BankError, BankResult};
use crate::models::{AccountNumber, Money, NewAccount};
use crate::services::{AccountService, TransactionService, TransferService};
use crate::storage::Storage;
use crate::validation;

use super::menu::{DashboardOption, MainMenuOption, MenuOption};
use super::prompt::{Terminal, ValidatedPrompt};

const INVALID_OPTION: &str = "Invalid option. Please try again.";
const INVALID_AMOUNT: &str = "Invalid amount. Please enter a valid positive number.";

/// The interactive bank console
pub struct BankApp<R, W> {
    terminal: Terminal<R, W>,
    storage: Storage,
    settings: Settings,
    rng: StdRng,
}

impl<R: BufRead, W: Write> BankApp<R, W> {
    /// Create a console with empty storage and an entropy-seeded generator
    pub fn new(terminal: Terminal<R, W>, settings: Settings) -> Self {
        Self {
            storage: Storage::new(&settings),
            terminal,
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for account number generation
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn terminal(&self) -> &Terminal<R, W> {
        &self.terminal
    }

    /// Run the main menu until the user exits
    pub fn run(&mut self) -> BankResult<()> {
        loop {
            self.say("Welcome to the Bank System")?;
            self.say(MainMenuOption::render())?;

            let Some(option) = self.choose::<MainMenuOption>()? else {
                continue;
            };

            match option {
                MainMenuOption::Signup => self.signup()?,
                MainMenuOption::Login => self.login()?,
                MainMenuOption::Exit => {
                    self.say("Thank you for using the Bank System.")?;
                    return Ok(());
                }
            }
        }
    }

    fn signup(&mut self) -> BankResult<()> {
        let Some(name) = self.ask(
            ValidatedPrompt::text("Enter your name: ")
                .validate(|s| validation::valid_name(s))
                .error("Invalid name! Name should only contain alphabetic characters."),
        )?
        else {
            return Ok(());
        };

        let Some(mobile) = self.ask(
            ValidatedPrompt::text("Enter your mobile number: ")
                .validate(|s| validation::valid_mobile(s))
                .error("Invalid mobile number! It should be 10 digits."),
        )?
        else {
            return Ok(());
        };

        let Some(age) = self.ask(
            ValidatedPrompt::integer("Enter your age: ")
                .validate(validation::valid_age)
                .error("Invalid age! You must be above 18 to create an account."),
        )?
        else {
            return Ok(());
        };

        let Some(nominee) = self.ask(
            ValidatedPrompt::text("Enter nominee name: ")
                .validate(|s| validation::valid_name(s))
                .error("Invalid nominee name! Name should only contain alphabetic characters."),
        )?
        else {
            return Ok(());
        };

        let Some(password) = self.ask(
            ValidatedPrompt::text("Enter your password: ")
                .secret()
                .validate(|s| validation::valid_password(s))
                .error("Invalid password! Password must be at least 6 characters."),
        )?
        else {
            return Ok(());
        };

        let details = NewAccount {
            name,
            mobile,
            age,
            nominee,
            password,
        };
        let prefix = &self.settings.account_prefix;
        let result = AccountService::new(&mut self.storage)
            .signup(details, prefix, &mut self.rng);

        match result {
            Ok(account) => self.say(format!(
                "Signup successful! Your account number is: {}",
                account.number
            )),
            Err(e @ (BankError::Validation(_) | BankError::Duplicate { .. })) => self.say(e),
            Err(e) => Err(e),
        }
    }

    fn login(&mut self) -> BankResult<()> {
        let Some(number) = self.ask_account_number("Enter your account number: ")? else {
            return Ok(());
        };

        let Some(password) = self.ask(
            ValidatedPrompt::text("Enter your password: ")
                .secret()
                .validate(|s| validation::valid_password(s))
                .error("Invalid password."),
        )?
        else {
            return Ok(());
        };

        let result = AccountService::new(&mut self.storage)
            .authenticate(number.as_str(), &password);
        match result {
            Ok(account) => {
                self.say("Login successful!")?;
                self.dashboard(&account.number)
            }
            Err(BankError::InvalidCredentials) => self.say("Invalid account number or password."),
            Err(e) => Err(e),
        }
    }

    fn dashboard(&mut self, number: &AccountNumber) -> BankResult<()> {
        loop {
            let account = AccountService::new(&mut self.storage)
                .get(number.as_str())
                .ok_or_else(|| BankError::account_not_found(number.as_str()))?;
            let header = format_dashboard_header(&account, &self.settings.currency_symbol);
            self.say(header)?;
            self.say(DashboardOption::render())?;

            let Some(option) = self.choose::<DashboardOption>()? else {
                continue;
            };

            match option {
                DashboardOption::Deposit => self.deposit(number)?,
                DashboardOption::Withdraw => self.withdraw(number)?,
                DashboardOption::Transaction => self.transaction(number)?,
                DashboardOption::Logout => {
                    AccountService::new(&mut self.storage).logout(number)?;
                    self.say("Logged out successfully.")?;
                    return Ok(());
                }
            }
        }
    }

    fn deposit(&mut self, number: &AccountNumber) -> BankResult<()> {
        let Some(amount) = self.ask_amount("Enter amount to deposit: ")? else {
            return Ok(());
        };

        let result = TransactionService::new(&mut self.storage)
            .deposit(number, amount);
        match result {
            Ok(_) => self.say(format!("Successfully deposited {}.", self.money(amount))),
            Err(BankError::Validation(message)) => self.say(message),
            Err(e) => Err(e),
        }
    }

    fn withdraw(&mut self, number: &AccountNumber) -> BankResult<()> {
        if !self.verify_password(number)? {
            return Ok(());
        }

        let Some(amount) = self.ask_amount("Enter amount to withdraw: ")? else {
            return Ok(());
        };

        let result = TransactionService::new(&mut self.storage)
            .withdraw(number, amount);
        match result {
            Ok(_) => self.say(format!("Successfully withdrew {}.", self.money(amount))),
            Err(BankError::InsufficientFunds { .. }) => self.say("Insufficient balance."),
            Err(BankError::Validation(message)) => self.say(message),
            Err(e) => Err(e),
        }
    }

    fn transaction(&mut self, number: &AccountNumber) -> BankResult<()> {
        if !self.verify_password(number)? {
            return Ok(());
        }

        let prompt = "Enter the account number to transfer to: ";
        let Some(target) = self.ask_account_number(prompt)? else {
            return Ok(());
        };

        let target_exists = AccountService::new(&mut self.storage)
            .exists(target.as_str());
        if !target_exists {
            return self.say("Target account does not exist.");
        }
        if &target == number {
            return self.say("Cannot transfer to the same account.");
        }

        let Some(amount) = self.ask_amount("Enter the amount to transfer: ")? else {
            return Ok(());
        };

        let result = TransferService::new(&mut self.storage)
            .transfer(number, &target, amount);
        match result {
            Ok(done) => self.say(format!(
                "Successfully transferred {} to account {}.",
                self.money(done.amount),
                target
            )),
            Err(BankError::InsufficientFunds { .. }) => self.say("Insufficient balance."),
            Err(BankError::Validation(message)) => self.say(message),
            Err(e) => Err(e),
        }
    }

    /// Step-up password check before a withdrawal or transfer
    ///
    /// A password prompt that runs out of attempts counts as one failed check.
    fn verify_password(&mut self, number: &AccountNumber) -> BankResult<bool> {
        for _ in 0..self.settings.max_attempts {
            let password = self.ask(
                ValidatedPrompt::text("Enter your password: ")
                    .secret()
                    .validate(|s| validation::valid_password(s))
                    .error("Invalid password."),
            )?;

            let verified = password.is_some_and(|p| {
                AccountService::new(&mut self.storage)
                    .verify_password(number.as_str(), &p)
            });
            if verified {
                return Ok(true);
            }

            self.say("Incorrect password. Please try again.")?;
        }

        self.say("Too many incorrect password attempts. Action aborted.")?;
        AccountService::new(&mut self.storage)
            .record_verification_failure(number)?;
        Ok(false)
    }

    fn choose<M: MenuOption>(&mut self) -> BankResult<Option<M>> {
        let code = self.ask(
            ValidatedPrompt::integer("Choose an option: ")
                .validate(M::is_valid_code)
                .error(INVALID_OPTION),
        )?;
        Ok(code.and_then(M::from_code))
    }

    fn ask_account_number(&mut self, prompt: &str) -> BankResult<Option<AccountNumber>> {
        let number = self.ask(
            ValidatedPrompt::text(prompt)
                .validate(|s| validation::valid_account_number(s))
                .error("Invalid account number."),
        )?;
        Ok(number.and_then(|n| AccountNumber::parse(&n).ok()))
    }

    fn ask_amount(&mut self, prompt: &str) -> BankResult<Option<Money>> {
        let prompt = format!("{}{}", prompt, self.settings.currency_symbol);
        self.ask(
            ValidatedPrompt::amount(prompt)
                .validate(validation::valid_amount)
                .error(INVALID_AMOUNT),
        )
    }

    fn ask<T>(&mut self, prompt: ValidatedPrompt<T>) -> BankResult<Option<T>> {
        prompt.ask(&mut self.terminal, self.settings.max_attempts)
    }

    fn say(&mut self, line: impl std::fmt::Display) -> BankResult<()> {
        self.terminal.say(line)
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.settings.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEvent;
    use std::io::Cursor;

    const SEED: u64 = 42;

    const ALICE: [&str; 6] = ["1", "Alice", "1234567890", "25", "Bob", "secret1"];
    const BOB: [&str; 6] = ["1", "Bob", "0987654321", "30", "Alice", "hunter22"];

    type TestApp = BankApp<Cursor<Vec<u8>>, Vec<u8>>;

    /// The first number a fresh app seeded with `SEED` hands out
    fn first_number() -> String {
        let mut rng = StdRng::seed_from_u64(SEED);
        AccountNumber::generate("1234", &mut rng).unwrap().to_string()
    }

    fn second_number() -> String {
        let mut rng = StdRng::seed_from_u64(SEED);
        AccountNumber::generate("1234", &mut rng).unwrap();
        AccountNumber::generate("1234", &mut rng).unwrap().to_string()
    }

    fn app(lines: &[&str]) -> TestApp {
        let mut input = lines.join("\n");
        input.push('\n');
        let terminal = Terminal::new(Cursor::new(input.into_bytes()), Vec::new());
        BankApp::new(terminal, Settings::default()).with_seed(SEED)
    }

    fn run(lines: &[&str]) -> (TestApp, String) {
        let mut app = app(lines);
        app.run().unwrap();
        let output = String::from_utf8(app.terminal().output().clone()).unwrap();
        (app, output)
    }

    /// Sign up every account, log in as the first one with `secret1`, send
    /// the dashboard lines, then log out and exit
    fn dashboard_session(signups: &[[&str; 6]], dashboard: &[&str]) -> (TestApp, String) {
        let number = first_number();
        let mut lines: Vec<&str> = signups.concat();
        lines.extend(["2", number.as_str(), "secret1"]);
        lines.extend_from_slice(dashboard);
        lines.extend(["4", "3"]);
        run(&lines)
    }

    fn balance(app: &TestApp, number: &str) -> Money {
        app.storage().accounts.get(number).unwrap().balance
    }

    fn count_events(app: &TestApp, event: AuditEvent) -> usize {
        let entries = app.storage().audit().entries();
        entries.iter().filter(|e| e.event == event).count()
    }

    #[test]
    fn test_exit_immediately() {
        let (_, output) = run(&["3"]);
        assert!(output.starts_with("Welcome to the Bank System\n1. Signup\n2. Login\n3. Exit\n"));
        assert!(output.ends_with("Choose an option: Thank you for using the Bank System.\n"));
    }

    #[test]
    fn test_signup_and_deposit_scenario() {
        let number = first_number();
        let (app, output) = dashboard_session(&[ALICE], &["1", "100.0"]);

        assert!(output.contains(&format!(
            "Signup successful! Your account number is: {}\n",
            number
        )));
        assert!(output.contains("Login successful!\n"));
        assert!(output.contains("Successfully deposited $100.00.\n"));
        assert!(output.contains("Account Dashboard for Alice\nAccount Balance: $100.00\n"));
        assert!(output.contains("Logged out successfully.\n"));
        assert_eq!(balance(&app, &number), Money::from_cents(10000));

        let account = app.storage().accounts.get(&number).unwrap();
        assert_eq!(account.mobile, "1234567890");
        assert_eq!(account.age, 25);
        assert_eq!(account.nominee, "Bob");
        assert_eq!(account.password(), "secret1");
    }

    #[test]
    fn test_signup_aborts_after_three_invalid_fields() {
        let (app, output) = run(&["1", "Alice", "12345", "abc", "123456789012", "3"]);

        assert!(output.contains("Invalid mobile number! It should be 10 digits.\n"));
        assert!(output.contains("Too many invalid attempts.\n"));
        assert!(!output.contains("Enter your age: "));
        assert!(!output.contains("Signup successful"));
        assert_eq!(app.storage().accounts.count(), 0);
    }

    #[test]
    fn test_signup_accepts_whitespace_nominee() {
        let number = first_number();
        let (app, output) = run(&["1", "Alice", "1234567890", "25", "   ", "secret1", "3"]);

        assert!(output.contains("Signup successful!"));
        assert_eq!(app.storage().accounts.get(&number).unwrap().nominee, "   ");
    }

    #[test]
    fn test_login_with_wrong_password() {
        let number = first_number();
        let mut lines = ALICE.to_vec();
        lines.extend(["2", number.as_str(), "wrong-password", "3"]);

        let (app, output) = run(&lines);

        assert!(output.contains("Invalid account number or password.\n"));
        assert!(!output.contains("Account Dashboard"));
        assert_eq!(balance(&app, &number), Money::zero());
    }

    #[test]
    fn test_login_with_unknown_account() {
        let (app, output) = run(&["2", "1234999999999999", "secret1", "3"]);

        assert!(output.contains("Invalid account number or password.\n"));
        assert_eq!(app.storage().audit().entries().len(), 1);
        assert_eq!(count_events(&app, AuditEvent::LoginFailed), 1);
    }

    #[test]
    fn test_login_aborts_after_three_invalid_numbers() {
        let (app, output) = run(&["2", "123", "abc", "12345678901234567", "3"]);

        assert_eq!(output.matches("Invalid account number.\n").count(), 3);
        assert!(output.contains("Too many invalid attempts.\n"));
        assert!(!output.contains("Enter your password: "));
        assert!(app.storage().audit().entries().is_empty());
    }

    #[test]
    fn test_deposit_aborts_after_three_invalid_amounts() {
        let number = first_number();
        let (app, output) = dashboard_session(&[ALICE], &["1", "0", "-5", "abc"]);

        assert_eq!(output.matches(INVALID_AMOUNT).count(), 3);
        assert!(output.contains("Too many invalid attempts.\n"));
        assert!(!output.contains("Successfully deposited"));
        assert_eq!(output.matches("Account Dashboard for Alice\n").count(), 2);
        assert_eq!(balance(&app, &number), Money::zero());
        assert_eq!(count_events(&app, AuditEvent::Deposit), 0);
    }

    #[test]
    fn test_deposit_rounds_to_cents() {
        let number = first_number();
        let (app, output) = dashboard_session(&[ALICE], &["1", "0.004", "10.999"]);

        assert!(output.contains(&format!("{}\nYou have 2 attempts left.\n", INVALID_AMOUNT)));
        assert!(output.contains("Successfully deposited $11.00.\n"));
        assert!(output.contains("Account Balance: $11.00\n"));
        assert_eq!(balance(&app, &number), Money::from_cents(1100));
    }

    #[test]
    fn test_withdraw() {
        let number = first_number();
        let dashboard = ["1", "100", "2", "secret1", "$25.50"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        assert!(output.contains("Successfully withdrew $25.50.\n"));
        assert!(output.contains("Account Balance: $74.50\n"));
        assert_eq!(balance(&app, &number), Money::from_cents(7450));
    }

    #[test]
    fn test_withdraw_insufficient_balance() {
        let number = first_number();
        let dashboard = ["1", "30", "2", "secret1", "50.0"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        assert!(output.contains("Insufficient balance.\n"));
        assert!(!output.contains("Successfully withdrew"));
        assert_eq!(output.matches("Account Balance: $30.00\n").count(), 2);
        assert_eq!(balance(&app, &number), Money::from_cents(3000));
    }

    #[test]
    fn test_withdraw_aborts_after_three_invalid_amounts() {
        let number = first_number();
        let dashboard = ["1", "100", "2", "secret1", "0", "abc", "-1"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        assert!(!output.contains("Incorrect password"));
        assert_eq!(output.matches(INVALID_AMOUNT).count(), 3);
        assert!(output.contains("Too many invalid attempts.\n"));
        assert!(!output.contains("Successfully withdrew"));
        assert_eq!(balance(&app, &number), Money::from_cents(10000));
        assert_eq!(count_events(&app, AuditEvent::Withdrawal), 0);
    }

    #[test]
    fn test_step_up_failure_aborts_withdrawal() {
        let number = first_number();
        let dashboard = ["1", "100", "2", "badpass1", "badpass2", "badpass3"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        let incorrect = output.matches("Incorrect password. Please try again.\n");
        assert_eq!(incorrect.count(), 3);
        assert!(output.contains("Too many incorrect password attempts. Action aborted.\n"));
        assert!(!output.contains("Enter amount to withdraw"));
        assert_eq!(balance(&app, &number), Money::from_cents(10000));
        assert_eq!(count_events(&app, AuditEvent::VerificationFailed), 1);
    }

    #[test]
    fn test_step_up_recovers_after_wrong_password() {
        let number = first_number();
        let dashboard = ["1", "100", "2", "notmine", "secret1", "10"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        let incorrect = output.matches("Incorrect password. Please try again.\n");
        assert_eq!(incorrect.count(), 1);
        assert_eq!(balance(&app, &number), Money::from_cents(9000));
    }

    #[test]
    fn test_transfer_between_accounts() {
        let alice = first_number();
        let bob = second_number();
        let dashboard = ["1", "100", "3", "secret1", bob.as_str(), "40"];
        let (app, output) = dashboard_session(&[ALICE, BOB], &dashboard);

        assert!(output.contains(&format!(
            "Successfully transferred $40.00 to account {}.\n",
            bob
        )));
        assert_eq!(balance(&app, &alice), Money::from_cents(6000));
        assert_eq!(balance(&app, &bob), Money::from_cents(4000));
    }

    #[test]
    fn test_transfer_to_missing_account() {
        let number = first_number();
        let dashboard = ["1", "100", "3", "secret1", "1234000000000000"];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        assert!(output.contains("Target account does not exist.\n"));
        assert!(!output.contains("Enter the amount to transfer"));
        assert_eq!(balance(&app, &number), Money::from_cents(10000));
    }

    #[test]
    fn test_transfer_to_same_account() {
        let number = first_number();
        let dashboard = ["1", "100", "3", "secret1", number.as_str()];
        let (app, output) = dashboard_session(&[ALICE], &dashboard);

        assert!(output.contains("Cannot transfer to the same account.\n"));
        assert!(!output.contains("Enter the amount to transfer"));
        assert_eq!(balance(&app, &number), Money::from_cents(10000));
        assert_eq!(count_events(&app, AuditEvent::Transfer), 0);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let alice = first_number();
        let bob = second_number();
        let dashboard = ["3", "secret1", bob.as_str(), "0.01"];
        let (app, output) = dashboard_session(&[ALICE, BOB], &dashboard);

        assert!(output.contains("Insufficient balance.\n"));
        assert_eq!(balance(&app, &alice), Money::zero());
        assert_eq!(balance(&app, &bob), Money::zero());
    }

    #[test]
    fn test_transfer_aborts_after_three_invalid_amounts() {
        let alice = first_number();
        let bob = second_number();
        let dashboard = ["1", "100", "3", "secret1", bob.as_str(), "0", "x", "-3"];
        let (app, output) = dashboard_session(&[ALICE, BOB], &dashboard);

        assert_eq!(output.matches(INVALID_AMOUNT).count(), 3);
        assert!(output.contains("Too many invalid attempts.\n"));
        assert!(!output.contains("Successfully transferred"));
        assert_eq!(balance(&app, &alice), Money::from_cents(10000));
        assert_eq!(balance(&app, &bob), Money::zero());
        assert_eq!(count_events(&app, AuditEvent::Transfer), 0);
    }

    #[test]
    fn test_main_menu_rejects_dashboard_only_option() {
        let (_, output) = run(&["4", "3"]);
        assert!(output.contains(INVALID_OPTION));
        assert!(output.contains("You have 2 attempts left.\n"));
    }

    #[test]
    fn test_menu_reshown_after_exhausted_attempts() {
        let (_, output) = run(&["9", "x", "0", "3"]);
        assert!(output.contains("Too many invalid attempts.\n"));
        assert_eq!(output.matches("Welcome to the Bank System\n").count(), 2);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut app = app(&["1", "Alice"]);
        assert!(matches!(app.run(), Err(BankError::InputClosed)));
        assert_eq!(app.storage().accounts.count(), 0);
    }

    #[test]
    fn test_custom_currency_and_attempts() {
        let input = "1\nR2D2\n3\n".to_string();
        let terminal = Terminal::new(Cursor::new(input.into_bytes()), Vec::new());
        let settings = Settings {
            max_attempts: 1,
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        let mut app = BankApp::new(terminal, settings).with_seed(SEED);
        app.run().unwrap();

        let output = String::from_utf8(app.terminal().output().clone()).unwrap();
        assert!(output.contains("You have 0 attempts left.\nToo many invalid attempts.\n"));
        assert!(output.ends_with("Thank you for using the Bank System.\n"));
    }
}
