//! engine::gate
//!
//! Requirement gating for command execution.
//!
//! # Architecture
//!
//! Each command declares an ordered [`RequirementSet`]. Gating evaluates the
//! requirements in declaration order against the scanned
//! [`CapabilitySet`] and stops at the first one that is not met. There is
//! no aggregation: the user sees exactly one requirement error.
//!
//! The target validator ([`check_target`]) runs before the command's own
//! requirements. It always requires a session and optionally an
//! organization and a space.
//!
//! # Invariants
//!
//! - Gating never touches the network
//! - A failed requirement always precedes any remote call
//! - Gating is deterministic given the same capability set
//!
//! # Example
//!
//! ```
//! use cfkit::engine::capabilities::{Capability, CapabilitySet};
//! use cfkit::engine::gate::{check_target, requirements, RequirementError, TargetScope};
//!
//! let caps = CapabilitySet::with([Capability::LoggedIn]);
//!
//! assert!(requirements::LOGIN.evaluate(&caps).is_ok());
//! assert_eq!(
//!     check_target(&caps, TargetScope::SPACE),
//!     Err(RequirementError::NoOrgTargeted)
//! );
//! ```

use thiserror::Error;

use super::capabilities::{Capability, CapabilitySet};

/// Errors from requirement evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequirementError {
    #[error("Not logged in. Use 'cf login' or 'cf login --sso' to log in.")]
    NotLoggedIn,

    #[error("No org targeted, use 'cf target -o ORG' to target an org.")]
    NoOrgTargeted,

    #[error("No space targeted, use 'cf target -s SPACE' to target a space.")]
    NoSpaceTargeted,
}

/// A single precondition, tagged by the capability it checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A session must exist.
    Login,
    /// An organization must be targeted.
    TargetedOrg,
    /// A space must be targeted.
    TargetedSpace,
}

impl Requirement {
    /// The capability that satisfies this requirement.
    pub fn capability(&self) -> Capability {
        match self {
            Requirement::Login => Capability::LoggedIn,
            Requirement::TargetedOrg => Capability::OrgTargeted,
            Requirement::TargetedSpace => Capability::SpaceTargeted,
        }
    }

    /// The error reported when this requirement is not met.
    pub fn error(&self) -> RequirementError {
        match self {
            Requirement::Login => RequirementError::NotLoggedIn,
            Requirement::TargetedOrg => RequirementError::NoOrgTargeted,
            Requirement::TargetedSpace => RequirementError::NoSpaceTargeted,
        }
    }

    /// Check this requirement against a capability set.
    pub fn check(&self, caps: &CapabilitySet) -> Result<(), RequirementError> {
        if caps.has(&self.capability()) {
            Ok(())
        } else {
            Err(self.error())
        }
    }
}

/// An ordered list of requirements declared by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSet {
    /// Human-readable name for this requirement set.
    pub name: &'static str,
    /// Requirements in evaluation order.
    pub requirements: &'static [Requirement],
}

impl RequirementSet {
    /// Create a new requirement set.
    pub const fn new(name: &'static str, requirements: &'static [Requirement]) -> Self {
        Self { name, requirements }
    }

    /// Evaluate requirements in order, stopping at the first failure.
    pub fn evaluate(&self, caps: &CapabilitySet) -> Result<(), RequirementError> {
        for requirement in self.requirements {
            if let Err(err) = requirement.check(caps) {
                tracing::debug!(set = self.name, ?requirement, "requirement not met");
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Predefined requirement sets.
pub mod requirements {
    use super::*;

    /// No preconditions.
    pub const NONE: RequirementSet = RequirementSet::new("none", &[]);

    /// A session must exist.
    pub const LOGIN: RequirementSet = RequirementSet::new("login", &[Requirement::Login]);

    /// A session and a targeted organization.
    pub const ORG: RequirementSet =
        RequirementSet::new("org", &[Requirement::Login, Requirement::TargetedOrg]);

    /// A session, a targeted organization, and a targeted space.
    pub const SPACE: RequirementSet = RequirementSet::new(
        "space",
        &[
            Requirement::Login,
            Requirement::TargetedOrg,
            Requirement::TargetedSpace,
        ],
    );
}

/// Which parts of the target a command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetScope {
    pub needs_org: bool,
    pub needs_space: bool,
}

impl TargetScope {
    /// Session only.
    pub const NONE: TargetScope = TargetScope {
        needs_org: false,
        needs_space: false,
    };

    /// Session and organization.
    pub const ORG: TargetScope = TargetScope {
        needs_org: true,
        needs_space: false,
    };

    /// Session, organization, and space.
    pub const SPACE: TargetScope = TargetScope {
        needs_org: true,
        needs_space: true,
    };

    fn requirements(&self) -> &'static RequirementSet {
        match (self.needs_org, self.needs_space) {
            (_, true) => &requirements::SPACE,
            (true, false) => &requirements::ORG,
            (false, false) => &requirements::LOGIN,
        }
    }
}

/// Verify that a session (and optionally an org and space) is targeted.
///
/// A scope that needs a space also checks the organization first.
pub fn check_target(caps: &CapabilitySet, scope: TargetScope) -> Result<(), RequirementError> {
    tracing::debug!(
        needs_org = scope.needs_org,
        needs_space = scope.needs_space,
        "checking target"
    );
    scope.requirements().evaluate(caps)
}
