//! ui::output
//!
//! Output sink for command execution.
//!
//! # Design
//!
//! Ordinary progress messages and the `OK` marker go to the primary stream
//! (stdout). Warnings, `FAILED`, and usage text go to the secondary stream
//! (stderr). The quiet flag suppresses progress messages and the `OK`
//! marker only; warnings and failures are always shown.
//!
//! Prompts write their label to the primary stream and then read from the
//! configured [`Input`]. Secret answers are never written back.
//!
//! Write failures on the terminal streams are ignored.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::prompts::{is_affirmative, Input, PromptError, TerminalInput};

/// Completion marker printed on success.
pub const OK_MARKER: &str = "OK";

/// Marker printed before a failure message.
pub const FAILED_MARKER: &str = "FAILED";

/// Terminal user interface: primary/secondary streams plus an input source.
pub struct Ui {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    input: Box<dyn Input>,
    interactive: bool,
    quiet: bool,
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("interactive", &self.interactive)
            .field("quiet", &self.quiet)
            .finish()
    }
}

impl Ui {
    /// Create a UI over arbitrary streams.
    pub fn new(
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
        input: Box<dyn Input>,
    ) -> Self {
        Self {
            out,
            err,
            input,
            interactive: true,
            quiet: false,
        }
    }

    /// Create a UI bound to the process stdout, stderr, and terminal.
    pub fn terminal(interactive: bool, quiet: bool) -> Self {
        Self::new(
            Box::new(io::stdout()),
            Box::new(io::stderr()),
            Box::new(TerminalInput::new()),
        )
        .with_interactive(interactive)
        .with_quiet(quiet)
    }

    /// Create an in-memory UI reading answers from `input`.
    ///
    /// Returns the UI and handles to its captured streams.
    ///
    /// # Example
    ///
    /// ```
    /// use cfkit::ui::output::Ui;
    ///
    /// let (mut ui, streams) = Ui::buffered("");
    /// ui.say("Deleting user bob...");
    /// ui.ok();
    /// assert_eq!(streams.out.contents(), "Deleting user bob...\nOK\n");
    /// ```
    pub fn buffered(input: &str) -> (Self, CapturedStreams) {
        let streams = CapturedStreams::default();
        let ui = Self::new(
            Box::new(streams.out.clone()),
            Box::new(streams.err.clone()),
            Box::new(super::prompts::BufferedInput::new(input)),
        );
        (ui, streams)
    }

    /// Enable or disable prompts.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Enable or disable quiet mode.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Print a progress message on the primary stream.
    pub fn say(&mut self, message: impl Display) {
        if !self.quiet {
            let _ = writeln!(self.out, "{}", message);
        }
    }

    /// Print a warning on the secondary stream.
    pub fn warn(&mut self, message: impl Display) {
        let _ = writeln!(self.err, "{}", message);
    }

    /// Print each warning on the secondary stream, in order.
    pub fn display_warnings<S: AsRef<str>>(&mut self, warnings: &[S]) {
        for warning in warnings {
            self.warn(warning.as_ref());
        }
    }

    /// Print the completion marker.
    pub fn ok(&mut self) {
        self.say(OK_MARKER);
    }

    /// Print the failure marker followed by the error message.
    pub fn failed(&mut self, message: impl Display) {
        let _ = writeln!(self.err, "{}", FAILED_MARKER);
        let _ = writeln!(self.err, "{}", message);
    }

    /// Report a usage error with the command's usage text.
    pub fn fail_with_usage(&mut self, usage: &str) {
        let _ = writeln!(self.err, "Incorrect Usage.\n");
        let _ = writeln!(self.err, "{}", usage);
    }

    /// Ask a yes/no question.
    ///
    /// Returns `Ok(true)` only for an affirmative answer.
    pub fn confirm(&mut self, question: impl Display) -> Result<bool, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        write!(self.out, "{} ", question)?;
        self.out.flush()?;
        let answer = self.input.read_line()?;
        Ok(is_affirmative(&answer))
    }

    /// Prompt for a secret with echo suppressed.
    ///
    /// Prints `"<label>: "` on the primary stream and returns the trimmed
    /// answer. The answer is never written to either stream.
    pub fn prompt_secret(&mut self, label: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        let secret = self.input.read_secret()?;
        // Terminal echo is off, so the user's newline was swallowed too.
        let _ = writeln!(self.out);
        Ok(secret.trim().to_string())
    }
}

/// A cloneable in-memory writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captured primary and secondary streams of a buffered [`Ui`].
#[derive(Debug, Clone, Default)]
pub struct CapturedStreams {
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}
