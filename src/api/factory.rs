//! api::factory
//!
//! Gateway selection and creation.
//!
//! # Design
//!
//! Commands never construct a concrete gateway. `create_gateway()` builds
//! one from the loaded configuration. When no endpoint or session is
//! configured it returns an [`UnconfiguredGateway`] whose every operation
//! fails, so that target checks still run first and report the more
//! specific error (for example "Not logged in").

use std::sync::Arc;

use async_trait::async_trait;

use super::cloud_controller::CloudControllerGateway;
use super::traits::{ApiError, Gateway, Response, ServiceBroker, ServiceBrokerUpdate, User};
use crate::core::config::Config;

/// Create the gateway described by `config`.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built.
pub fn create_gateway(config: &Config) -> Result<Arc<dyn Gateway>, ApiError> {
    let (Some(endpoint), Some(token)) = (
        config.api_endpoint.as_deref(),
        config.access_token.as_deref().filter(|_| config.is_logged_in()),
    ) else {
        tracing::debug!("no endpoint or session configured");
        return Ok(Arc::new(UnconfiguredGateway));
    };

    let gateway = CloudControllerGateway::new(
        endpoint,
        token,
        config.user.clone(),
        config.skip_ssl_validation,
    )?;
    tracing::debug!(api = endpoint, "created gateway");
    Ok(Arc::new(gateway))
}

/// Gateway used when no API endpoint or session is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredGateway;

#[async_trait]
impl Gateway for UnconfiguredGateway {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn current_user(&self) -> Response<User> {
        Response::error(ApiError::NoApiEndpoint)
    }

    async fn find_user_by_username(&self, _username: &str) -> Response<User> {
        Response::error(ApiError::NoApiEndpoint)
    }

    async fn delete_user(&self, _user: &User) -> Response<()> {
        Response::error(ApiError::NoApiEndpoint)
    }

    async fn find_service_broker_by_name(&self, _name: &str) -> Response<ServiceBroker> {
        Response::error(ApiError::NoApiEndpoint)
    }

    async fn update_service_broker(
        &self,
        _guid: &str,
        _update: &ServiceBrokerUpdate,
    ) -> Response<()> {
        Response::error(ApiError::NoApiEndpoint)
    }
}
