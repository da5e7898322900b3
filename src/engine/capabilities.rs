//! engine::capabilities
//!
//! Capability system for command gating.
//!
//! # Architecture
//!
//! Capabilities are proofs about the session and target. A capability
//! either exists or does not. [`scan`] derives the set from the loaded
//! configuration; requirements are then checked against that set without
//! touching the network.
//!
//! # Example
//!
//! ```
//! use cfkit::engine::capabilities::{Capability, CapabilitySet};
//!
//! let caps = CapabilitySet::with([Capability::LoggedIn]);
//!
//! assert!(caps.has(&Capability::LoggedIn));
//! assert!(!caps.has(&Capability::OrgTargeted));
//! ```

use std::collections::HashSet;

use crate::core::config::Config;

/// A proven fact about the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A session token is stored.
    LoggedIn,

    /// An organization is targeted.
    OrgTargeted,

    /// A space is targeted.
    SpaceTargeted,
}

impl Capability {
    /// Get a human-readable description of the capability.
    pub fn description(&self) -> &'static str {
        match self {
            Capability::LoggedIn => "logged in",
            Capability::OrgTargeted => "organization targeted",
            Capability::SpaceTargeted => "space targeted",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A set of established capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capability set with the given capabilities.
    pub fn with<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }

    /// Insert a capability into the set.
    pub fn insert(&mut self, cap: Capability) {
        self.capabilities.insert(cap);
    }

    /// Check if a capability is present.
    pub fn has(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }
}

/// Derive the capability set from configuration.
pub fn scan(config: &Config) -> CapabilitySet {
    let mut caps = CapabilitySet::new();
    if config.is_logged_in() {
        caps.insert(Capability::LoggedIn);
    }
    if config.has_org() {
        caps.insert(Capability::OrgTargeted);
    }
    if config.has_space() {
        caps.insert(Capability::SpaceTargeted);
    }
    tracing::debug!(capabilities = ?caps.capabilities, "scanned session");
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TargetRef;

    #[test]
    fn empty_set_has_nothing() {
        let caps = CapabilitySet::new();
        assert!(!caps.has(&Capability::LoggedIn));
    }

    #[test]
    fn insert_adds_capability() {
        let mut caps = CapabilitySet::new();
        caps.insert(Capability::OrgTargeted);
        assert!(caps.has(&Capability::OrgTargeted));
        assert!(!caps.has(&Capability::SpaceTargeted));
    }

    #[test]
    fn scan_logged_out_config() {
        assert_eq!(scan(&Config::default()), CapabilitySet::new());
    }

    #[test]
    fn scan_full_target() {
        let config = Config {
            access_token: Some("bearer t".into()),
            org: Some(TargetRef {
                name: "o".into(),
                guid: "og".into(),
            }),
            space: Some(TargetRef {
                name: "s".into(),
                guid: "sg".into(),
            }),
            ..Default::default()
        };
        assert_eq!(
            scan(&config),
            CapabilitySet::with([
                Capability::LoggedIn,
                Capability::OrgTargeted,
                Capability::SpaceTargeted,
            ])
        );
    }

    #[test]
    fn display_uses_description() {
        assert_eq!(Capability::LoggedIn.to_string(), "logged in");
    }
}
