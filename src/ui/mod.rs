//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output sink: progress, warnings, markers, confirmations
//! - [`prompts`] - Line and secret input sources
//!
//! # Design
//!
//! All terminal output and prompts go through this module so that commands
//! can be exercised against in-memory streams.

pub mod output;
pub mod prompts;

pub use output::{CapturedStreams, SharedBuffer, Ui};
pub use prompts::{BufferedInput, Input, PromptError, TerminalInput};
