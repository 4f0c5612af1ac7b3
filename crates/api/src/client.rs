//! HTTP client shared by every service module

use crate::error::{ApiError, Result};
use crate::response::{decode_body, ApiResponse, BinaryResponse, ErrorKey};
use reqwest::{Method, RequestBuilder};
use shared::ClientConfig;
use std::sync::{Arc, RwLock};

/// Client for the registration backend
///
/// Cheap to clone; clones share the bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client for `config.api_base_url`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = config.base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::Config(format!("invalid base URL: {}", base)));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("congress/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Builder: start with a bearer token
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Replace (or clear) the bearer token sent with every request
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.filter(|t| !t.trim().is_empty());
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Request builder with the bearer token attached
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and fold the outcome into an `ApiResponse`
    pub(crate) async fn send(&self, builder: RequestBuilder, key: ErrorKey) -> ApiResponse {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "request failed before a response arrived");
                return ApiResponse::network_error(key);
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(text) => {
                tracing::debug!(status, "received response");
                ApiResponse::new(status, decode_body(status, &text))
            }
            Err(e) => {
                tracing::warn!(status, error = %e, "failed to read response body");
                ApiResponse::network_error(key)
            }
        }
    }

    /// Send a request whose body is a file download
    pub(crate) async fn send_binary(&self, builder: RequestBuilder) -> BinaryResponse {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "download failed before a response arrived");
                return BinaryResponse::network_error();
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => BinaryResponse {
                status,
                bytes: bytes.to_vec(),
            },
            Err(e) => {
                tracing::warn!(status, error = %e, "failed to read download body");
                BinaryResponse::network_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = ApiClient::new(ClientConfig::default().with_base_url("localhost")).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client =
            ApiClient::new(ClientConfig::default().with_base_url("http://api.local/")).unwrap();
        assert_eq!(client.url("/api/roles"), "http://api.local/api/roles");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let other = client.clone();
        client.set_token(Some("abc".into()));
        assert_eq!(other.token().as_deref(), Some("abc"));

        client.set_token(Some("  ".into()));
        assert!(other.token().is_none());
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/roles"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_token("tok-1");
        let resp = client.send(client.request(Method::GET, "/api/roles"), ErrorKey::Error).await;
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/roles"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Prohibido"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let resp = client.send(client.request(Method::GET, "/api/roles"), ErrorKey::Error).await;
        assert_eq!(resp.status, 403);
        assert_eq!(resp.error_message().as_deref(), Some("Prohibido"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_synthetic_500() {
        // Nothing listens on port 9 (discard) in the test environment
        let client =
            ApiClient::new(ClientConfig::default().with_base_url("http://127.0.0.1:9")).unwrap();
        let resp = client.send(client.request(Method::GET, "/api/roles"), ErrorKey::Message).await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.data, json!({"message": "Error de red o desconocido"}));
    }
}
