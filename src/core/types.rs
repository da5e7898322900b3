//! core::types
//!
//! Invocation types shared by the engine and the command handlers.
//!
//! # Invariants
//!
//! - An `Invocation` is built once per process run and never mutated
//! - Boolean flags that were not given read as `false`

use std::collections::BTreeMap;

/// Named boolean flags of a command invocation.
///
/// # Example
///
/// ```
/// use cfkit::core::types::Flags;
///
/// let flags = Flags::new().with_bool("f", true);
/// assert!(flags.bool("f"));
/// assert!(!flags.bool("quiet"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    values: BTreeMap<String, bool>,
}

impl Flags {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean flag.
    pub fn with_bool(mut self, name: impl Into<String>, value: bool) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Read a boolean flag, defaulting to `false`.
    pub fn bool(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }
}

/// A parsed command invocation: positional arguments and named flags.
///
/// # Example
///
/// ```
/// use cfkit::core::types::{Flags, Invocation};
///
/// let inv = Invocation::new(["bob"], Flags::new().with_bool("f", true));
/// assert_eq!(inv.len(), 1);
/// assert_eq!(inv.arg(0), Some("bob"));
/// assert!(inv.flags().bool("f"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
    flags: Flags,
}

impl Invocation {
    /// Create an invocation from positional arguments and flags.
    pub fn new<I, S>(args: I, flags: Flags) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            flags,
        }
    }

    /// All positional arguments in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True if no positional arguments were given.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Named flags.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }
}
