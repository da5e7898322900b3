//! api::cloud_controller
//!
//! HTTP gateway for a Cloud-Controller-style v3 API.
//!
//! # Endpoints
//!
//! - `GET /v3/users?usernames=<name>` (empty list is not-found)
//! - `DELETE /v3/users/<guid>`
//! - `GET /v3/service_brokers?names=<name>` (empty list is not-found)
//! - `PATCH /v3/service_brokers/<guid>`
//!
//! # Warnings
//!
//! The platform attaches advisory messages in the `X-Cf-Warnings` response
//! header as a comma-separated list. They are returned on every response,
//! including failed ones.
//!
//! # Errors
//!
//! - 401 maps to `ApiError::InvalidToken`
//! - 404 maps to `RemoteOutcome::NotFound`
//! - Other non-2xx statuses map to `ApiError::Http` using the first
//!   `errors[].detail` of the body when present
//!
//! No request is retried.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::traits::{
    ApiError, Gateway, RemoteOutcome, Response, ServiceBroker, ServiceBrokerUpdate, User,
    Warnings,
};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "cfkit";

/// Response header carrying platform warnings.
pub const WARNINGS_HEADER: &str = "X-Cf-Warnings";

/// Gateway backed by the platform's HTTP API.
pub struct CloudControllerGateway {
    /// HTTP client for making requests
    client: Client,
    /// API base URL without trailing slash
    api_base: String,
    /// Authorization header value
    token: String,
    /// Name of the logged-in user
    user: Option<String>,
}

// Custom Debug to avoid exposing token
impl std::fmt::Debug for CloudControllerGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudControllerGateway")
            .field("api_base", &self.api_base)
            .field("user", &self.user)
            .finish()
    }
}

/// Paginated list envelope.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    resources: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct UserResource {
    guid: String,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceBrokerResource {
    guid: String,
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    detail: String,
}

impl CloudControllerGateway {
    /// Create a gateway for `api_base` authenticated with `token`.
    ///
    /// A token without a scheme is sent as a bearer token.
    pub fn new(
        api_base: &str,
        token: &str,
        user: Option<String>,
        skip_ssl_validation: bool,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(skip_ssl_validation)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let token = if token.to_ascii_lowercase().starts_with("bearer ") {
            token.to_string()
        } else {
            format!("bearer {}", token)
        };

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            user,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let mut auth =
            HeaderValue::from_str(&self.token).map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    /// Send a request and decode a JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Response<T> {
        self.send(request, |body| {
            serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
        })
        .await
    }

    /// Send a request whose body is ignored on success.
    async fn execute_empty(&self, request: RequestBuilder) -> Response<()> {
        self.send(request, |_| Ok(())).await
    }

    async fn send<T, F>(&self, request: RequestBuilder, decode: F) -> Response<T>
    where
        F: FnOnce(&[u8]) -> Result<T, ApiError>,
    {
        let headers = match self.headers() {
            Ok(h) => h,
            Err(e) => return Response::error(e),
        };

        let response = match request.headers(headers).send().await {
            Ok(r) => r,
            Err(e) => return Response::error(ApiError::Network(e.to_string())),
        };

        let status = response.status();
        let warnings = parse_warnings(response.headers());
        tracing::debug!(status = status.as_u16(), warnings = warnings.len(), "api response");

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                return Response::error(ApiError::Network(e.to_string())).with_warnings(warnings)
            }
        };

        let outcome = if status.is_success() {
            match decode(&body[..]) {
                Ok(value) => RemoteOutcome::Success(value),
                Err(e) => RemoteOutcome::Error(e),
            }
        } else {
            match status {
                StatusCode::NOT_FOUND => RemoteOutcome::NotFound,
                StatusCode::UNAUTHORIZED => RemoteOutcome::Error(ApiError::InvalidToken),
                _ => RemoteOutcome::Error(http_error(status, &body)),
            }
        };

        Response { outcome, warnings }
    }
}

/// Split the warnings header into individual messages.
pub(crate) fn parse_warnings(headers: &HeaderMap) -> Warnings {
    headers
        .get_all(WARNINGS_HEADER)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

fn http_error(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().map(|e| e.detail).find(|d| !d.is_empty()));
    tracing::debug!(status = status.as_u16(), has_detail = detail.is_some(), "api error");

    ApiError::Http {
        status: status.as_u16(),
        description: detail.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        }),
    }
}

fn first<T>(list: ListResponse<T>) -> RemoteOutcome<T> {
    match list.resources.into_iter().next() {
        Some(item) => RemoteOutcome::Success(item),
        None => RemoteOutcome::NotFound,
    }
}

#[async_trait]
impl Gateway for CloudControllerGateway {
    fn name(&self) -> &'static str {
        "cloud-controller"
    }

    async fn current_user(&self) -> Response<User> {
        match &self.user {
            Some(name) => Response::success(User {
                guid: String::new(),
                username: name.clone(),
            }),
            None => Response::error(ApiError::Message("no user found".to_string())),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Response<User> {
        let request = self
            .client
            .get(self.url("/v3/users"))
            .query(&[("usernames", username)]);

        let wanted = username.to_string();
        self.execute::<ListResponse<UserResource>>(request)
            .await
            .and_then(first)
            .and_then(|r| {
                RemoteOutcome::Success(User {
                    guid: r.guid,
                    username: r.username.unwrap_or(wanted),
                })
            })
    }

    async fn delete_user(&self, user: &User) -> Response<()> {
        let request = self
            .client
            .delete(self.url(&format!("/v3/users/{}", user.guid)));
        self.execute_empty(request).await
    }

    async fn find_service_broker_by_name(&self, name: &str) -> Response<ServiceBroker> {
        let request = self
            .client
            .get(self.url("/v3/service_brokers"))
            .query(&[("names", name)]);

        self.execute::<ListResponse<ServiceBrokerResource>>(request)
            .await
            .and_then(first)
            .and_then(|r| {
                RemoteOutcome::Success(ServiceBroker {
                    guid: r.guid,
                    name: r.name,
                    url: r.url,
                })
            })
    }

    async fn update_service_broker(
        &self,
        guid: &str,
        update: &ServiceBrokerUpdate,
    ) -> Response<()> {
        let body = serde_json::json!({
            "url": update.url,
            "authentication": {
                "type": "basic",
                "credentials": {
                    "username": update.username,
                    "password": update.password.expose(),
                },
            },
        });

        let request = self
            .client
            .patch(self.url(&format!("/v3/service_brokers/{}", guid)))
            .json(&body);
        self.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_header_is_split_and_trimmed() {
        let mut headers = HeaderMap::new();
        headers.append(WARNINGS_HEADER, HeaderValue::from_static("first, second"));
        headers.append(WARNINGS_HEADER, HeaderValue::from_static("third,,"));
        assert_eq!(parse_warnings(&headers), vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_warnings_header_is_empty() {
        assert!(parse_warnings(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn http_error_uses_detail() {
        let body = br#"{"errors":[{"detail":"URL must be https","title":"CF-UnprocessableEntity","code":10008}]}"#;
        let err = http_error(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                description: "URL must be https".to_string(),
            }
        );
    }

    #[test]
    fn http_error_falls_back_to_reason() {
        let err = http_error(StatusCode::BAD_GATEWAY, b"<html>");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn token_gets_bearer_scheme() {
        let gateway =
            CloudControllerGateway::new("https://api.example.com/", "abc", None, false).unwrap();
        assert_eq!(gateway.token, "bearer abc");
        assert_eq!(gateway.url("/v3/users"), "https://api.example.com/v3/users");

        let debug = format!("{:?}", gateway);
        assert!(!debug.contains("bearer"));
    }
}
