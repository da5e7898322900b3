//! credentials
//!
//! Multi-source secret resolution.
//!
//! # Precedence
//!
//! A secret is resolved from the first source that supplies it:
//!
//! 1. A non-empty positional argument, used verbatim
//! 2. The named environment variable, if set (an empty value counts as set)
//! 3. An interactive prompt with echo suppressed, trimmed
//!
//! An explicit empty positional argument (`""`) means "not provided" and
//! falls through to the environment and then the prompt.
//!
//! # Security
//!
//! - Secret values are never logged, printed, or included in error messages
//! - [`Credential`] and [`Secret`] redact their `Debug` output
//! - Only the [`Provenance`] of a resolved secret is logged
//!
//! # Example
//!
//! ```
//! use cfkit::credentials::{resolve, MapEnv, Provenance, SecretSpec};
//! use cfkit::ui::Ui;
//!
//! let spec = SecretSpec::new("password", "CF_BROKER_PASSWORD", "Service Broker Password");
//! let env = MapEnv::new().with("CF_BROKER_PASSWORD", "var-password");
//! let (mut ui, _streams) = Ui::buffered("");
//!
//! let cred = resolve(&spec, None, &env, &mut ui).unwrap();
//! assert_eq!(cred.provenance(), Provenance::Environment);
//! assert_eq!(cred.secret().expose(), "var-password");
//! ```

use std::collections::HashMap;

use crate::ui::{PromptError, Ui};

/// Source of environment variables.
pub trait Environment: Send + Sync {
    /// Value of `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

/// A fixed set of variables, for tests.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Where a secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Argument,
    Environment,
    Prompt,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Argument => write!(f, "argument"),
            Provenance::Environment => write!(f, "environment"),
            Provenance::Prompt => write!(f, "prompt"),
        }
    }
}

/// Description of a secret input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSpec {
    /// Logical name, used in logs.
    pub name: &'static str,
    /// Environment variable that overrides prompting.
    pub env_var: &'static str,
    /// Label shown when prompting.
    pub prompt: &'static str,
}

impl SecretSpec {
    pub const fn new(name: &'static str, env_var: &'static str, prompt: &'static str) -> Self {
        Self {
            name,
            env_var,
            prompt,
        }
    }
}

/// A secret string with redacted `Debug` and no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret. Do not log or print it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(<redacted>)")
    }
}

/// A resolved secret and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    name: &'static str,
    secret: Secret,
    provenance: Provenance,
}

impl Credential {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Consume the credential, keeping only the secret.
    pub fn into_secret(self) -> Secret {
        self.secret
    }
}

/// Resolve a secret following argument, environment, prompt precedence.
///
/// # Errors
///
/// Returns a `PromptError` only when prompting is required and fails
/// (for example, in non-interactive mode).
pub fn resolve(
    spec: &SecretSpec,
    positional: Option<&str>,
    env: &dyn Environment,
    ui: &mut Ui,
) -> Result<Credential, PromptError> {
    let (value, provenance) = match positional.filter(|v| !v.is_empty()) {
        Some(value) => (value.to_string(), Provenance::Argument),
        None => match env.var(spec.env_var) {
            Some(value) => (value, Provenance::Environment),
            None => (ui.prompt_secret(spec.prompt)?, Provenance::Prompt),
        },
    };

    tracing::debug!(secret = spec.name, source = %provenance, "resolved secret");

    Ok(Credential {
        name: spec.name,
        secret: Secret(value),
        provenance,
    })
}
