//! Main client implementation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::error::{Error, ErrorResponse, Result};
use crate::types::{Capture, CaptureRequest, VersionInfo};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder user id used until proper user management exists.
pub const DEFAULT_USER_ID: &str = "e1ccf5f8-e1d6-4541-ae0a-72946f5fb3d9";

/// Client for the grind capture API.
///
/// # Example
///
/// ```no_run
/// use grind_client::GrindClient;
///
/// # async fn example() -> grind_client::Result<()> {
/// let client = GrindClient::builder()
///     .base_url("http://localhost:8080")
///     .build()?;
///
/// client.create_capture("remember the milk").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GrindClient {
    http: reqwest::Client,
    base_url: Url,
    user_id: String,
    timeout: Duration,
}

impl GrindClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the user id captures are attributed to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Submit a capture.
    pub async fn create_capture(&self, text: &str) -> Result<()> {
        let body = CaptureRequest {
            user_id: self.user_id.clone(),
            raw_text: text.to_string(),
            migrated: false,
        };

        let response = self
            .http
            .post(self.url("v1/capture")?)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(extract_error(response).await);
        }
        tracing::debug!(user_id = %self.user_id, "capture submitted");
        Ok(())
    }

    /// List captures not yet migrated into the main system.
    ///
    /// A body that is not an array reads as an empty list.
    pub async fn list_unmigrated(&self) -> Result<Vec<Capture>> {
        let path = format!("v1/capture/user/{}", self.user_id);
        let response = self
            .http
            .get(self.url(&path)?)
            .query(&[("migrated", "false")])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(extract_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        if body.is_array() {
            serde_json::from_value(body).map_err(|e| Error::InvalidResponse(e.to_string()))
        } else {
            Ok(Vec::new())
        }
    }

    /// Fetch the API's version info.
    pub async fn get_version(&self) -> Result<VersionInfo> {
        let response = self
            .http
            .get(self.url("v1/version")?)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(extract_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        serde_json::from_value(body)
            .map_err(|e| Error::InvalidResponse(format!("invalid version response: {e}")))
    }

    /// Build a URL for an API path.
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::from)
    }
}

/// Extract an error from a failed response.
async fn extract_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();

    match response.json::<ErrorResponse>().await {
        Ok(err) => Error::Api {
            status,
            message: err.message,
        },
        Err(_) => Error::Api {
            status,
            message: format!("HTTP {}", status),
        },
    }
}

/// Builder for creating a [`GrindClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_id: Option<String>,
    auth_token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the user id captures are attributed to.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set a bearer token sent on every request.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GrindClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Strip trailing slashes before parsing, then re-add exactly one so
        // joins can't produce double slashes.
        let mut base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Config("Invalid auth token".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(format!("grind-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let user_id = self
            .user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        Ok(GrindClient {
            http,
            base_url,
            user_id,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_requires_base_url() {
        assert!(ClientBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_normalizes_trailing_slashes() {
        let client = GrindClient::builder()
            .base_url("http://localhost:8080//")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_builder_defaults_user_id() {
        let client = GrindClient::builder()
            .base_url("http://localhost:8080")
            .build()
            .unwrap();
        assert_eq!(client.user_id(), DEFAULT_USER_ID);

        // blank user id falls back to the placeholder too
        let client = GrindClient::builder()
            .base_url("http://localhost:8080")
            .user_id("  ")
            .build()
            .unwrap();
        assert_eq!(client.user_id(), DEFAULT_USER_ID);
    }

    #[tokio::test]
    async fn test_create_capture_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/capture"))
            .and(body_json(json!({
                "userId": "user-1",
                "rawText": "an idea",
                "migrated": false,
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .user_id("user-1")
            .build()
            .unwrap();
        client.create_capture("an idea").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_capture_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/capture"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "message": "text too long" })),
            )
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let err = client.create_capture("x").await.unwrap_err();
        assert!(err.to_string().contains("text too long"));
    }

    #[tokio::test]
    async fn test_list_unmigrated_parses_captures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/capture/user/user-1"))
            .and(query_param("migrated", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "c1", "rawText": "first", "createdAt": "2024-06-01T10:00:00Z" },
                { "rawText": "second" },
            ])))
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .user_id("user-1")
            .build()
            .unwrap();
        let captures = client.list_unmigrated().await.unwrap();

        assert_eq!(captures.len(), 2);
        assert_eq!(captures[0].raw_text, "first");
        assert_eq!(captures[0].id.as_deref(), Some("c1"));
        assert_eq!(captures[1].id, None);
    }

    #[tokio::test]
    async fn test_list_unmigrated_non_array_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/capture/user/user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .user_id("user-1")
            .build()
            .unwrap();
        assert!(client.list_unmigrated().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_version_parses_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "1.4.2",
                "service": "grind-api",
                "timestamp": "2024-06-01T10:00:00Z",
            })))
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let info = client.get_version().await.unwrap();

        assert_eq!(info.version, "1.4.2");
        assert_eq!(info.service.as_deref(), Some("grind-api"));
    }

    #[tokio::test]
    async fn test_get_version_missing_field_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "service": "x" })))
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let err = client.get_version().await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_auth_token_sent_as_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/version"))
            .and(header("authorization", "Bearer tok1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "version": "1.0.0" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GrindClient::builder()
            .base_url(server.uri())
            .auth_token("tok1")
            .build()
            .unwrap();
        client.get_version().await.unwrap();
    }
}
