//! ui::prompts
//!
//! Line and secret input sources.
//!
//! # Design
//!
//! Reading from the terminal is hidden behind the [`Input`] trait so that
//! tests can substitute an in-memory [`BufferedInput`] without needing a
//! real TTY. [`TerminalInput`] reads lines from stdin. Secrets go through
//! `rpassword`, which disables echo for the duration of the read, when
//! stdin is a terminal; piped secrets are read as plain lines.
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input fail with [`PromptError::NotInteractive`].

use std::io::{self, BufRead, Cursor, IsTerminal};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// A source of user input.
///
/// Implementations return the raw line without its terminator. Reaching
/// end of input yields an empty string.
pub trait Input: Send {
    /// Read one line with echo.
    fn read_line(&mut self) -> Result<String, PromptError>;

    /// Read one line with echo suppressed.
    ///
    /// The returned value is a secret. Do not log or print it.
    fn read_secret(&mut self) -> Result<String, PromptError>;
}

/// Input from the process terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl Input for TerminalInput {
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(strip_newline(line))
    }

    fn read_secret(&mut self) -> Result<String, PromptError> {
        if !io::stdin().is_terminal() {
            return self.read_line();
        }
        let secret = rpassword::read_password()?;
        Ok(strip_newline(secret))
    }
}

/// In-memory input, one answer per line.
///
/// # Example
///
/// ```
/// use cfkit::ui::prompts::{BufferedInput, Input};
///
/// let mut input = BufferedInput::new("y\nhunter2\n");
/// assert_eq!(input.read_line().unwrap(), "y");
/// assert_eq!(input.read_secret().unwrap(), "hunter2");
/// assert_eq!(input.read_line().unwrap(), "");
/// ```
#[derive(Debug, Default)]
pub struct BufferedInput {
    reader: Cursor<Vec<u8>>,
}

impl BufferedInput {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            reader: Cursor::new(contents.into().into_bytes()),
        }
    }
}

impl Input for BufferedInput {
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(strip_newline(line))
    }

    fn read_secret(&mut self) -> Result<String, PromptError> {
        self.read_line()
    }
}

fn strip_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Whether a confirmation answer is affirmative.
///
/// Only `y` and `yes` (any case, surrounding whitespace ignored) confirm.
/// A blank answer declines.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" YES \n"));
    }

    #[test]
    fn non_affirmative_answers() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah"));
    }

    #[test]
    fn buffered_input_strips_crlf() {
        let mut input = BufferedInput::new("secret\r\n");
        assert_eq!(input.read_secret().unwrap(), "secret");
    }

    #[test]
    fn buffered_input_eof_is_empty() {
        let mut input = BufferedInput::new("");
        assert_eq!(input.read_line().unwrap(), "");
    }

    #[test]
    fn error_display() {
        assert!(PromptError::NotInteractive
            .to_string()
            .contains("interactive"));
        let err: PromptError = io::Error::new(io::ErrorKind::Other, "tty gone").into();
        assert!(err.to_string().contains("tty gone"));
    }
}
