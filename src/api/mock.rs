//! api::mock
//!
//! Mock gateway implementation for deterministic testing.
//!
//! # Design
//!
//! The mock gateway returns programmable responses per operation and
//! records every call so tests can assert on call counts and arguments.
//! Unprogrammed operations succeed with plausible fixtures.
//!
//! # Example
//!
//! ```
//! use cfkit::api::mock::{MockGateway, MockOperation};
//! use cfkit::api::{Gateway, RemoteOutcome, Response};
//!
//! # tokio_test_block_on(async {
//! let gateway = MockGateway::new().with_user_lookup(Response::not_found());
//!
//! let response = gateway.find_user_by_username("bob").await;
//! assert!(response.outcome.is_not_found());
//! assert_eq!(gateway.operations(), vec![MockOperation::FindUserByUsername {
//!     username: "bob".to_string(),
//! }]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{Gateway, Response, ServiceBroker, ServiceBrokerUpdate, User};
use crate::credentials::Secret;

/// GUID returned by the default user lookup.
pub const MOCK_USER_GUID: &str = "fake-user-guid";

/// GUID returned by the default service broker lookup.
pub const MOCK_BROKER_GUID: &str = "fake-service-broker-guid";

/// Mock gateway for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    inner: Arc<Mutex<MockGatewayInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockGatewayInner {
    current_user: Option<Response<User>>,
    user_lookup: Option<Response<User>>,
    delete_user: Option<Response<()>>,
    broker_lookup: Option<Response<ServiceBroker>>,
    broker_update: Option<Response<()>>,
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CurrentUser,
    FindUserByUsername {
        username: String,
    },
    DeleteUser {
        guid: String,
    },
    FindServiceBrokerByName {
        name: String,
    },
    UpdateServiceBroker {
        guid: String,
        username: String,
        password: Secret,
        url: String,
    },
}

impl MockGateway {
    /// Create a mock where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockGatewayInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Program the `current_user` response.
    pub fn with_current_user(self, response: Response<User>) -> Self {
        self.lock().current_user = Some(response);
        self
    }

    /// Program the `find_user_by_username` response.
    pub fn with_user_lookup(self, response: Response<User>) -> Self {
        self.lock().user_lookup = Some(response);
        self
    }

    /// Program the `delete_user` response.
    pub fn with_delete_user(self, response: Response<()>) -> Self {
        self.lock().delete_user = Some(response);
        self
    }

    /// Program the `find_service_broker_by_name` response.
    pub fn with_broker_lookup(self, response: Response<ServiceBroker>) -> Self {
        self.lock().broker_lookup = Some(response);
        self
    }

    /// Program the `update_service_broker` response.
    pub fn with_broker_update(self, response: Response<()>) -> Self {
        self.lock().broker_update = Some(response);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Total number of gateway calls.
    pub fn call_count(&self) -> usize {
        self.lock().operations.len()
    }

    /// Recorded `update_service_broker` calls.
    pub fn broker_updates(&self) -> Vec<MockOperation> {
        self.operations()
            .into_iter()
            .filter(|op| matches!(op, MockOperation::UpdateServiceBroker { .. }))
            .collect()
    }

    fn record(&self, op: MockOperation) {
        self.lock().operations.push(op);
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn current_user(&self) -> Response<User> {
        self.record(MockOperation::CurrentUser);
        self.lock().current_user.clone().unwrap_or_else(|| {
            Response::success(User {
                guid: "fake-current-user-guid".to_string(),
                username: "user".to_string(),
            })
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Response<User> {
        self.record(MockOperation::FindUserByUsername {
            username: username.to_string(),
        });
        self.lock().user_lookup.clone().unwrap_or_else(|| {
            Response::success(User {
                guid: MOCK_USER_GUID.to_string(),
                username: username.to_string(),
            })
        })
    }

    async fn delete_user(&self, user: &User) -> Response<()> {
        self.record(MockOperation::DeleteUser {
            guid: user.guid.clone(),
        });
        self.lock()
            .delete_user
            .clone()
            .unwrap_or_else(|| Response::success(()))
    }

    async fn find_service_broker_by_name(&self, name: &str) -> Response<ServiceBroker> {
        self.record(MockOperation::FindServiceBrokerByName {
            name: name.to_string(),
        });
        self.lock().broker_lookup.clone().unwrap_or_else(|| {
            Response::success(ServiceBroker {
                guid: MOCK_BROKER_GUID.to_string(),
                name: name.to_string(),
                url: "https://broker.example.com".to_string(),
            })
        })
    }

    async fn update_service_broker(
        &self,
        guid: &str,
        update: &ServiceBrokerUpdate,
    ) -> Response<()> {
        self.record(MockOperation::UpdateServiceBroker {
            guid: guid.to_string(),
            username: update.username.clone(),
            password: update.password.clone(),
            url: update.url.clone(),
        });
        self.lock()
            .broker_update
            .clone()
            .unwrap_or_else(|| Response::success(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[tokio::test]
    async fn defaults_succeed() {
        let gateway = MockGateway::new();
        let user = gateway.find_user_by_username("bob").await;
        assert!(user.outcome.is_success());
        assert!(user.warnings.is_empty());
        assert!(gateway.delete_user(&User {
            guid: MOCK_USER_GUID.into(),
            username: "bob".into(),
        })
        .await
        .outcome
        .is_success());
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn programmed_response_is_returned() {
        let gateway = MockGateway::new().with_broker_update(
            Response::error(ApiError::Message("something went wrong".into()))
                .with_warnings(["a-warning"]),
        );
        let response = gateway
            .update_service_broker(
                "guid",
                &ServiceBrokerUpdate {
                    username: "u".into(),
                    password: Secret::new("p"),
                    url: "https://b".into(),
                },
            )
            .await;
        assert!(response.outcome.is_error());
        assert_eq!(response.warnings, vec!["a-warning".to_string()]);
        assert_eq!(gateway.broker_updates().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_recorded_operations() {
        let gateway = MockGateway::new();
        let clone = gateway.clone();
        clone.current_user().await;
        assert_eq!(gateway.operations(), vec![MockOperation::CurrentUser]);
    }
}
