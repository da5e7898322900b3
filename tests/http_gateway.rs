//! Integration tests for the HTTP gateway.
//!
//! These tests run `CloudControllerGateway` against a local `wiremock`
//! server and check request shapes, outcome mapping, and warning parsing.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cfkit::api::cloud_controller::{CloudControllerGateway, WARNINGS_HEADER};
use cfkit::api::{ApiError, Gateway, RemoteOutcome, ServiceBrokerUpdate, User};
use cfkit::credentials::Secret;

fn gateway(server: &MockServer) -> CloudControllerGateway {
    CloudControllerGateway::new(&server.uri(), "token", Some("admin".to_string()), false).unwrap()
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn find_user_returns_first_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .and(query_param("usernames", "bob"))
        .and(header("authorization", "bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"guid": "user-guid", "username": "bob"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway(&server).find_user_by_username("bob").await;
    assert_eq!(
        response.outcome,
        RemoteOutcome::Success(User {
            guid: "user-guid".to_string(),
            username: "bob".to_string(),
        })
    );
    assert!(response.warnings.is_empty());
}

#[tokio::test]
async fn empty_user_list_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"resources": []}))
                .insert_header(WARNINGS_HEADER, "lookup warning"),
        )
        .mount(&server)
        .await;

    let response = gateway(&server).find_user_by_username("ghost").await;
    assert!(response.outcome.is_not_found());
    assert_eq!(response.warnings, vec!["lookup warning".to_string()]);
}

#[tokio::test]
async fn delete_user_hits_guid_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v3/users/user-guid"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let user = User {
        guid: "user-guid".to_string(),
        username: "bob".to_string(),
    };
    let response = gateway(&server).delete_user(&user).await;
    assert!(response.outcome.is_success());
}

#[tokio::test]
async fn delete_of_vanished_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v3/users/user-guid"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let user = User {
        guid: "user-guid".to_string(),
        username: "bob".to_string(),
    };
    assert!(gateway(&server)
        .delete_user(&user)
        .await
        .outcome
        .is_not_found());
}

// =============================================================================
// Service brokers
// =============================================================================

#[tokio::test]
async fn update_service_broker_sends_basic_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v3/service_brokers/broker-guid"))
        .and(body_json(json!({
            "url": "https://broker.example.com",
            "authentication": {
                "type": "basic",
                "credentials": {"username": "broker-user", "password": "s3cret"}
            }
        })))
        .respond_with(
            ResponseTemplate::new(202).insert_header(WARNINGS_HEADER, "first, second"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = ServiceBrokerUpdate {
        username: "broker-user".to_string(),
        password: Secret::new("s3cret"),
        url: "https://broker.example.com".to_string(),
    };
    let response = gateway(&server)
        .update_service_broker("broker-guid", &update)
        .await;

    assert!(response.outcome.is_success());
    assert_eq!(response.warnings, vec!["first", "second"]);
}

#[tokio::test]
async fn find_service_broker_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/service_brokers"))
        .and(query_param("names", "my-broker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"guid": "broker-guid", "name": "my-broker", "url": "https://b"}]
        })))
        .mount(&server)
        .await;

    let response = gateway(&server).find_service_broker_by_name("my-broker").await;
    match response.outcome {
        RemoteOutcome::Success(broker) => {
            assert_eq!(broker.guid, "broker-guid");
            assert_eq!(broker.url, "https://b");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn server_error_uses_error_detail_and_keeps_warnings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/service_brokers"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"errors": [{"detail": "database unavailable"}]}))
                .insert_header(WARNINGS_HEADER, "degraded"),
        )
        .mount(&server)
        .await;

    let response = gateway(&server).find_service_broker_by_name("b").await;
    assert_eq!(
        response.outcome,
        RemoteOutcome::Error(ApiError::Http {
            status: 500,
            description: "database unavailable".to_string(),
        })
    );
    if let RemoteOutcome::Error(err) = &response.outcome {
        assert_eq!(err.to_string(), "database unavailable");
    }
    assert_eq!(response.warnings, vec!["degraded"]);
}

#[tokio::test]
async fn unauthorized_is_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = gateway(&server).find_user_by_username("bob").await;
    assert_eq!(response.outcome, RemoteOutcome::Error(ApiError::InvalidToken));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let response = gateway(&server).find_user_by_username("bob").await;
    assert!(matches!(
        response.outcome,
        RemoteOutcome::Error(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn current_user_comes_from_configuration() {
    let server = MockServer::start().await;
    let response = gateway(&server).current_user().await;
    match response.outcome {
        RemoteOutcome::Success(user) => assert_eq!(user.username, "admin"),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let anonymous = CloudControllerGateway::new(&server.uri(), "token", None, false).unwrap();
    assert_eq!(
        anonymous.current_user().await.outcome,
        RemoteOutcome::Error(ApiError::Message("no user found".to_string()))
    );
}
