//! api::traits
//!
//! Gateway trait definition for the remote platform API.
//!
//! # Design
//!
//! The `Gateway` trait is async because its operations involve network I/O.
//! Every operation returns a [`Response`]: a tri-state [`RemoteOutcome`]
//! plus the ordered list of non-fatal warnings the platform attached to the
//! call. Warnings are returned alongside the outcome rather than written to
//! shared state, so a gateway call can be asserted on in isolation.
//!
//! "Not found" is reported as [`RemoteOutcome::NotFound`], never as an
//! [`ApiError`], so callers can tell it apart from real failures.
//!
//! # Example
//!
//! ```ignore
//! use cfkit::api::{Gateway, RemoteOutcome};
//!
//! async fn show(gateway: &dyn Gateway) {
//!     let response = gateway.find_user_by_username("bob").await;
//!     for warning in &response.warnings {
//!         eprintln!("{}", warning);
//!     }
//!     match response.outcome {
//!         RemoteOutcome::Success(user) => println!("{}", user.guid),
//!         RemoteOutcome::NotFound => println!("no such user"),
//!         RemoteOutcome::Error(err) => eprintln!("{}", err),
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::credentials::Secret;

/// Errors from gateway operations.
///
/// Messages are shown to the user unmodified and never contain secrets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No API endpoint is configured.
    #[error("No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint.")]
    NoApiEndpoint,

    /// The session token was rejected.
    #[error("Invalid auth token. Re-login with 'cf login'.")]
    InvalidToken,

    /// A required entity does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The API returned an error status.
    #[error("{description}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error detail from the API
        description: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("invalid response from API: {0}")]
    Decode(String),

    /// Any other failure, reported verbatim.
    #[error("{0}")]
    Message(String),
}

/// Non-fatal advisory messages returned by the platform, in receipt order.
pub type Warnings = Vec<String>;

/// Tri-state result of a remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    /// The operation succeeded with a payload.
    Success(T),
    /// The looked-up entity does not exist.
    NotFound,
    /// The operation failed.
    Error(ApiError),
}

impl<T> RemoteOutcome<T> {
    /// Check if the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Success(_))
    }

    /// Check if the outcome is not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteOutcome::NotFound)
    }

    /// Check if the outcome is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, RemoteOutcome::Error(_))
    }
}

/// Outcome of a remote operation with its warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    pub outcome: RemoteOutcome<T>,
    pub warnings: Warnings,
}

impl<T> Response<T> {
    /// A successful response without warnings.
    pub fn success(value: T) -> Self {
        Self::from_outcome(RemoteOutcome::Success(value))
    }

    /// A not-found response without warnings.
    pub fn not_found() -> Self {
        Self::from_outcome(RemoteOutcome::NotFound)
    }

    /// A failed response without warnings.
    pub fn error(err: ApiError) -> Self {
        Self::from_outcome(RemoteOutcome::Error(err))
    }

    fn from_outcome(outcome: RemoteOutcome<T>) -> Self {
        Self {
            outcome,
            warnings: Vec::new(),
        }
    }

    /// Attach warnings, replacing any already present.
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings = warnings.into_iter().map(Into::into).collect();
        self
    }

    /// Transform a success payload into a new outcome, keeping the warnings.
    pub fn and_then<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> RemoteOutcome<U>,
    {
        let outcome = match self.outcome {
            RemoteOutcome::Success(value) => f(value),
            RemoteOutcome::NotFound => RemoteOutcome::NotFound,
            RemoteOutcome::Error(err) => RemoteOutcome::Error(err),
        };
        Response {
            outcome,
            warnings: self.warnings,
        }
    }
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub guid: String,
    pub username: String,
}

/// A registered service broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBroker {
    pub guid: String,
    pub name: String,
    pub url: String,
}

/// New connection settings for a service broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBrokerUpdate {
    pub username: String,
    pub password: Secret,
    pub url: String,
}

/// The Gateway trait: sole point of contact with the remote platform.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Outcomes
///
/// Lookup operations (`find_*`) report a missing entity as
/// `RemoteOutcome::NotFound`. Mutations may also report `NotFound` when
/// the entity vanished between lookup and mutation.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Get the gateway name (e.g., "cloud-controller", "mock").
    fn name(&self) -> &'static str;

    /// The user owning the current session.
    async fn current_user(&self) -> Response<User>;

    /// Look up a user by username.
    async fn find_user_by_username(&self, username: &str) -> Response<User>;

    /// Delete a user.
    async fn delete_user(&self, user: &User) -> Response<()>;

    /// Look up a service broker by name.
    async fn find_service_broker_by_name(&self, name: &str) -> Response<ServiceBroker>;

    /// Update a service broker's URL and credentials.
    async fn update_service_broker(
        &self,
        guid: &str,
        update: &ServiceBrokerUpdate,
    ) -> Response<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_then_keeps_warnings() {
        let response = Response::success(vec![1, 2])
            .with_warnings(["w1"])
            .and_then(|v| match v.first() {
                Some(n) => RemoteOutcome::Success(*n),
                None => RemoteOutcome::NotFound,
            });
        assert_eq!(response.outcome, RemoteOutcome::Success(1));
        assert_eq!(response.warnings, vec!["w1".to_string()]);
    }

    #[test]
    fn and_then_passes_errors_through() {
        let response: Response<Vec<u8>> =
            Response::error(ApiError::Message("boom".into())).with_warnings(["w"]);
        let mapped = response.and_then(|_| RemoteOutcome::Success(()));
        assert!(mapped.outcome.is_error());
        assert_eq!(mapped.warnings.len(), 1);
    }

    #[test]
    fn error_messages_are_verbatim() {
        assert_eq!(
            ApiError::Message("something went wrong".into()).to_string(),
            "something went wrong"
        );
        let err = ApiError::Http {
            status: 422,
            description: "URL is invalid".into(),
        };
        assert_eq!(err.to_string(), "URL is invalid");
    }

    #[test]
    fn outcome_predicates() {
        assert!(RemoteOutcome::Success(()).is_success());
        assert!(RemoteOutcome::<()>::NotFound.is_not_found());
        assert!(RemoteOutcome::<()>::Error(ApiError::InvalidToken).is_error());
    }
}
