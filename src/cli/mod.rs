//! Command implementations and password prompts

pub mod decrypt;
pub mod encrypt;

use std::io::{BufRead, ErrorKind, IsTerminal};

use secrecy::{ExposeSecret, SecretString};

use crate::error::{CryptifyError, Result};

pub const PASSWORD_PROMPT: &str = "Enter password: ";
pub const CONFIRM_PROMPT: &str = "Re-enter password: ";

/// Sizes of a finished run, for the summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub bytes_in: usize,
    pub bytes_out: usize,
}

/// Where passwords come from
pub trait PasswordSource {
    /// Read one password after showing `prompt`. Empty input is an error.
    fn read_password(&mut self, prompt: &str) -> Result<SecretString>;
}

/// Interactive prompt with echo disabled
///
/// When stdin is a terminal, `rpassword` shows the prompt on the tty and
/// restores the echo flag before returning, on the error path as well.
/// Piped stdin is read line by line with [`read_password_from`].
pub struct TerminalPrompt;

impl PasswordSource for TerminalPrompt {
    fn read_password(&mut self, prompt: &str) -> Result<SecretString> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return read_password_from(&mut stdin.lock());
        }

        // On a tty, Ctrl-D with or without typed text both surface as EOF
        let password = match rpassword::prompt_password(prompt) {
            Ok(password) => SecretString::new(password),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(CryptifyError::EmptyPassword)
            }
            Err(e) => return Err(e.into()),
        };

        if password.expose_secret().is_empty() {
            return Err(CryptifyError::EmptyPassword);
        }
        Ok(password)
    }
}

/// Reads one password per line from any buffered reader
pub struct ReaderPrompt<R> {
    reader: R,
}

impl<R: BufRead> ReaderPrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> PasswordSource for ReaderPrompt<R> {
    fn read_password(&mut self, _prompt: &str) -> Result<SecretString> {
        read_password_from(&mut self.reader)
    }
}

/// Read one newline-terminated password from `reader`
///
/// # Errors
/// - `EmptyPassword` at end of input or on an empty line
/// - `UnterminatedPassword` if input ends mid-line, before the newline
pub fn read_password_from(reader: &mut impl BufRead) -> Result<SecretString> {
    if reader.fill_buf()?.is_empty() {
        return Err(CryptifyError::EmptyPassword);
    }

    match rpassword::read_password_from_bufread(reader) {
        Ok(password) if password.is_empty() => Err(CryptifyError::EmptyPassword),
        Ok(password) => Ok(SecretString::new(password)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(CryptifyError::UnterminatedPassword),
        Err(e) => Err(e.into()),
    }
}

/// Ask for a new password twice and require both entries to match
pub fn prompt_new_password(source: &mut impl PasswordSource) -> Result<SecretString> {
    let password = source.read_password(PASSWORD_PROMPT)?;
    let confirm = source.read_password(CONFIRM_PROMPT)?;

    if password.expose_secret() != confirm.expose_secret() {
        return Err(CryptifyError::PasswordMismatch);
    }

    Ok(password)
}

/// Ask for an existing password once
pub fn prompt_password(source: &mut impl PasswordSource) -> Result<SecretString> {
    source.read_password(PASSWORD_PROMPT)
}
