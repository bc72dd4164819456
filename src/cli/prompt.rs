//! Password input
//!
//! Passwords come from the terminal with echo disabled, or one per line from
//! stdin when `--password-stdin` is given (scripts and tests).

use std::io::BufRead;

use crate::crypto::SecureString;
use crate::error::{SeedsaverError, SeedsaverResult};

/// Where passwords are read from
pub enum PasswordReader {
    /// Hidden terminal prompt via rpassword
    Terminal,
    /// One password per line
    Lines(Box<dyn BufRead>),
}

impl PasswordReader {
    pub fn new(from_stdin: bool) -> Self {
        if from_stdin {
            Self::Lines(Box::new(std::io::BufReader::new(std::io::stdin())))
        } else {
            Self::Terminal
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Read one password; `None` at end of input
    pub fn read(&mut self, prompt: &str) -> SeedsaverResult<Option<SecureString>> {
        match self {
            Self::Terminal => rpassword::prompt_password(prompt)
                .map(|p| Some(SecureString::new(p)))
                .map_err(|e| SeedsaverError::Io(format!("Failed to read password: {}", e))),
            Self::Lines(reader) => {
                let mut line = String::new();
                let read = reader
                    .read_line(&mut line)
                    .map_err(|e| SeedsaverError::Io(format!("Failed to read password: {}", e)));
                let line = SecureString::new(line);
                if read? == 0 {
                    return Ok(None);
                }
                Ok(Some(SecureString::new(line.trim_end_matches(|c: char| c == '\r' || c == '\n'))))
            }
        }
    }
}

/// Check a new password against its confirmation and the length policy
pub fn validate_new_password(
    password: &SecureString,
    confirmation: &SecureString,
    min_len: usize,
) -> SeedsaverResult<()> {
    if password != confirmation {
        return Err(SeedsaverError::Validation("Passwords don't match".into()));
    }
    if password.char_count() < min_len {
        return Err(SeedsaverError::Validation(format!(
            "Password must be at least {} characters",
            min_len
        )));
    }
    Ok(())
}

/// Prompt for a new password with confirmation
///
/// On a terminal the user is asked again after a mismatch or a too-short
/// password; piped input fails straight away.
pub fn prompt_new_password(reader: &mut PasswordReader, min_len: usize) -> SeedsaverResult<SecureString> {
    loop {
        let password = reader
            .read("Enter password: ")?
            .ok_or_else(|| SeedsaverError::Validation("No password given".into()))?;
        let confirmation = reader
            .read("Confirm password: ")?
            .ok_or_else(|| SeedsaverError::Validation("No password confirmation given".into()))?;

        match validate_new_password(&password, &confirmation, min_len) {
            Ok(()) => return Ok(password),
            Err(e) if reader.is_interactive() => eprintln!("{}. Please try again.", e),
            Err(e) => return Err(e),
        }
    }
}
