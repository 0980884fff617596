//! Line-oriented console input
//!
//! `Terminal` wraps any reader/writer pair so sessions can be scripted in
//! tests. `ValidatedPrompt` is the single "prompt, convert, check, retry"
//! routine every field in the console goes through.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{BankError, BankResult};
use crate::models::Money;

/// A console bound to an input and an output stream
pub struct Terminal<R, W> {
    input: R,
    output: W,
    /// Read secrets with hidden echo instead of from `input`
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    /// Read passwords through `rpassword` (only meaningful on a real TTY)
    pub fn with_hidden_secrets(mut self, hide: bool) -> Self {
        self.hide_secrets = hide;
        self
    }

    /// Print one line
    pub fn say(&mut self, line: impl Display) -> BankResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print `prompt` and read one line without its line ending
    pub fn read_line(&mut self, prompt: &str) -> BankResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BankError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Read a password, hiding the echo when enabled
    pub fn read_secret(&mut self, prompt: &str) -> BankResult<String> {
        if !self.hide_secrets {
            return self.read_line(prompt);
        }

        self.output.flush()?;
        rpassword::prompt_password(prompt)
            .map_err(|e| BankError::Io(format!("Failed to read password: {}", e)))
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// A prompt that converts and validates its answer, retrying a bounded
/// number of times
///
/// # Example
///
/// ```rust,ignore
/// let age = ValidatedPrompt::integer("Enter your age: ")
///     .validate(validation::valid_age)
///     .error("Invalid age! You must be above 18 to create an account.")
///     .ask(&mut terminal, 3)?;
/// ```
pub struct ValidatedPrompt<T> {
    prompt: String,
    error: String,
    convert: fn(&str) -> Option<T>,
    check: fn(&T) -> bool,
    secret: bool,
}

impl ValidatedPrompt<String> {
    /// Free text, kept exactly as typed
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::with_converter(prompt, |s| Some(s.to_string()))
    }
}

impl ValidatedPrompt<u32> {
    /// A non-negative whole number; surrounding whitespace is ignored
    pub fn integer(prompt: impl Into<String>) -> Self {
        Self::with_converter(prompt, |s| s.trim().parse().ok())
    }
}

impl ValidatedPrompt<Money> {
    /// A currency amount such as `100`, `12.5` or `$12.50`
    pub fn amount(prompt: impl Into<String>) -> Self {
        Self::with_converter(prompt, |s| Money::parse(s).ok())
    }
}

impl<T> ValidatedPrompt<T> {
    fn with_converter(prompt: impl Into<String>, convert: fn(&str) -> Option<T>) -> Self {
        Self {
            prompt: prompt.into(),
            error: "Invalid input.".to_string(),
            convert,
            check: |_| true,
            secret: false,
        }
    }

    /// Predicate the converted value must satisfy
    pub fn validate(mut self, check: fn(&T) -> bool) -> Self {
        self.check = check;
        self
    }

    /// Message printed after a rejected answer
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = message.into();
        self
    }

    /// Read the answer as a secret (password)
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Ask until an answer passes or `max_attempts` answers have failed
    ///
    /// Returns `Ok(None)` once the attempts are used up; the caller aborts
    /// whatever it was doing. Unparseable answers count as failed attempts.
    pub fn ask<R: BufRead, W: Write>(
        &self,
        terminal: &mut Terminal<R, W>,
        max_attempts: u32,
    ) -> BankResult<Option<T>> {
        for attempt in 1..=max_attempts {
            let line = if self.secret {
                terminal.read_secret(&self.prompt)?
            } else {
                terminal.read_line(&self.prompt)?
            };

            if let Some(value) = (self.convert)(&line).filter(|v| (self.check)(v)) {
                return Ok(Some(value));
            }

            terminal.say(&self.error)?;
            terminal.say(format!(
                "You have {} attempts left.",
                max_attempts - attempt
            ))?;
        }

        terminal.say("Too many invalid attempts.")?;
        Ok(None)
    }
}
