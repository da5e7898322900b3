//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! api_endpoint = "https://api.example.com"
//! access_token = "bearer eyJhbGciOi..."
//! user = "admin"
//! skip_ssl_validation = false
//!
//! [org]
//! name = "my-org"
//! guid = "5d9c2c4f-..."
//!
//! [space]
//! name = "dev"
//! guid = "1f3b9a77-..."
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing. The access token is never part of
//! any validation message.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Persisted CLI configuration: API endpoint, session, and target.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the platform API.
    pub api_endpoint: Option<String>,

    /// OAuth access token of the current session.
    pub access_token: Option<String>,

    /// Name of the logged-in user.
    pub user: Option<String>,

    /// Accept self-signed certificates on the API endpoint.
    pub skip_ssl_validation: bool,

    /// Targeted organization.
    pub org: Option<TargetRef>,

    /// Targeted space.
    pub space: Option<TargetRef>,
}

// Custom Debug to avoid exposing access_token
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_endpoint", &self.api_endpoint)
            .field("has_access_token", &self.access_token.is_some())
            .field("user", &self.user)
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .field("org", &self.org)
            .field("space", &self.space)
            .finish()
    }
}

impl Config {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.api_endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid api_endpoint '{}', must start with http:// or https://",
                    endpoint
                )));
            }
        }

        if let Some(org) = &self.org {
            org.validate("org")?;
        }
        if let Some(space) = &self.space {
            space.validate("space")?;
        }

        Ok(())
    }

    /// Whether a session token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.access_token
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whether an organization is targeted.
    pub fn has_org(&self) -> bool {
        self.org.is_some()
    }

    /// Whether a space is targeted.
    pub fn has_space(&self) -> bool {
        self.space.is_some()
    }
}

/// A targeted organization or space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetRef {
    /// Display name.
    pub name: String,
    /// Platform identifier.
    pub guid: String,
}

impl TargetRef {
    fn validate(&self, what: &str) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "{} name cannot be empty",
                what
            )));
        }
        Ok(())
    }
}
