//! Gating matrix tests.
//!
//! These tests verify that commands are gated on session and target
//! state before any remote call, and that exactly one requirement error
//! is reported.
//!
//! # Test Categories
//!
//! 1. **Requirement sets** - Predefined sets against every capability mix
//! 2. **Target scopes** - Session, org, and space checks
//! 3. **Commands** - Real commands make zero gateway calls when gated

use cfkit::api::mock::MockGateway;
use cfkit::cli::commands::{DeleteUser, UpdateServiceBroker};
use cfkit::core::config::{Config, TargetRef};
use cfkit::core::types::{Flags, Invocation};
use cfkit::credentials::MapEnv;
use cfkit::engine::capabilities::{scan, Capability, CapabilitySet};
use cfkit::engine::command::Command;
use cfkit::engine::gate::{check_target, requirements, RequirementError, TargetScope};
use cfkit::engine::{CommandError, Executor, InvocationResult, FORCE_FLAG};
use cfkit::ui::Ui;

// =============================================================================
// Test Fixtures
// =============================================================================

fn caps(list: &[Capability]) -> CapabilitySet {
    CapabilitySet::with(list.iter().copied())
}

fn target(name: &str) -> Option<TargetRef> {
    Some(TargetRef {
        name: name.to_string(),
        guid: format!("{}-guid", name),
    })
}

async fn gated_error<C: Command>(
    command: &C,
    args: &[&str],
    caps: &CapabilitySet,
) -> RequirementError {
    let gateway = MockGateway::new();
    let env = MapEnv::new().with("CF_BROKER_PASSWORD", "pw");
    let (mut ui, streams) = Ui::buffered("y\n");
    let inv = Invocation::new(args.iter().copied(), Flags::new().with_bool(FORCE_FLAG, true));

    let result = Executor::new(&mut ui, &gateway, &env, caps)
        .execute(command, &inv)
        .await;

    assert_eq!(gateway.call_count(), 0, "gated command reached the gateway");
    assert_eq!(streams.out.contents(), "");
    match result {
        InvocationResult::Failed(CommandError::Requirement(err)) => {
            assert_eq!(streams.err.contents(), format!("FAILED\n{}\n", err));
            err
        }
        other => panic!("expected a requirement failure, got {:?}", other),
    }
}

// =============================================================================
// Requirement sets
// =============================================================================

mod requirement_sets {
    use super::*;

    #[test]
    fn space_set_reports_first_missing_in_order() {
        let cases = [
            (caps(&[]), Err(RequirementError::NotLoggedIn)),
            (
                caps(&[Capability::OrgTargeted, Capability::SpaceTargeted]),
                Err(RequirementError::NotLoggedIn),
            ),
            (
                caps(&[Capability::LoggedIn, Capability::SpaceTargeted]),
                Err(RequirementError::NoOrgTargeted),
            ),
            (
                caps(&[Capability::LoggedIn, Capability::OrgTargeted]),
                Err(RequirementError::NoSpaceTargeted),
            ),
            (
                caps(&[
                    Capability::LoggedIn,
                    Capability::OrgTargeted,
                    Capability::SpaceTargeted,
                ]),
                Ok(()),
            ),
        ];

        for (caps, expected) in cases {
            assert_eq!(requirements::SPACE.evaluate(&caps), expected, "{:?}", caps);
        }
    }

    #[test]
    fn login_set_ignores_target() {
        assert!(requirements::LOGIN
            .evaluate(&caps(&[Capability::LoggedIn]))
            .is_ok());
        assert_eq!(
            requirements::LOGIN.evaluate(&caps(&[Capability::OrgTargeted])),
            Err(RequirementError::NotLoggedIn)
        );
    }
}

// =============================================================================
// Target scopes
// =============================================================================

mod target_scopes {
    use super::*;

    #[test]
    fn scopes_from_scanned_config() {
        let logged_out = scan(&Config::default());
        assert_eq!(
            check_target(&logged_out, TargetScope::NONE),
            Err(RequirementError::NotLoggedIn)
        );

        let session = scan(&Config {
            access_token: Some("bearer t".into()),
            ..Default::default()
        });
        assert!(check_target(&session, TargetScope::NONE).is_ok());
        assert_eq!(
            check_target(&session, TargetScope::ORG),
            Err(RequirementError::NoOrgTargeted)
        );

        let targeted = scan(&Config {
            access_token: Some("bearer t".into()),
            org: target("org"),
            space: target("space"),
            ..Default::default()
        });
        assert!(check_target(&targeted, TargetScope::SPACE).is_ok());
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let caps = scan(&Config {
            access_token: Some("   ".into()),
            ..Default::default()
        });
        assert!(!caps.has(&Capability::LoggedIn));
    }
}

// =============================================================================
// Commands
// =============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn delete_user_needs_login() {
        let err = gated_error(&DeleteUser, &["bob"], &CapabilitySet::new()).await;
        assert_eq!(err, RequirementError::NotLoggedIn);
    }

    #[tokio::test]
    async fn update_service_broker_needs_login() {
        let err = gated_error(
            &UpdateServiceBroker,
            &["name", "user", "pass", "url"],
            &caps(&[Capability::OrgTargeted, Capability::SpaceTargeted]),
        )
        .await;
        assert_eq!(err, RequirementError::NotLoggedIn);
    }
}
