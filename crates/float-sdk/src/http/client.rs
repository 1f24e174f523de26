/*
[INPUT]:  HTTP configuration (timeouts) and API requests
[OUTPUT]: Configured reqwest clients sharing a session cookie jar
[POS]:    HTTP layer - production transport implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::http::transport::{ApiRequest, Transport};
use crate::http::{FloatError, Result};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
        }
    }
}

/// reqwest-backed transport
///
/// Requests flagged `with_credentials` go through a client sharing one cookie
/// jar, so a session established by the users API is attached to later calls.
/// Other requests use a client with no cookie store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    credentialed: Client,
    anonymous: Client,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let timeout = Duration::from_secs(config.request_secs);
        let connect_timeout = Duration::from_secs(config.connect_secs);

        let credentialed = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .cookie_provider(jar)
            .build()
            .map_err(|e| FloatError::Config(format!("failed to build HTTP client: {e}")))?;
        let anonymous = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| FloatError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            credentialed,
            anonymous,
        })
    }

    fn client_for(&self, with_credentials: bool) -> &Client {
        if with_credentials {
            &self.credentialed
        } else {
            &self.anonymous
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let request_id = Uuid::new_v4().to_string();
        debug!(
            method = %request.method,
            url = %request.url,
            request_id = %request_id,
            with_credentials = request.with_credentials,
            "sending request"
        );

        let mut builder = self
            .client_for(request.with_credentials)
            .request(request.method, request.url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), request_id = %request_id, "response received");

        if !status.is_success() {
            return Err(FloatError::from_response(status, &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, Url};
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(server: &MockServer, method: Method, path: &str) -> ApiRequest {
        let url = Url::parse(&server.uri()).unwrap().join(path).unwrap();
        ApiRequest::new(method, url)
    }

    #[tokio::test]
    async fn test_send_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header_exists(REQUEST_ID_HEADER))
            .and(body_json(serde_json::json!({"email": "a@b.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let body = transport
            .send(request(&server, Method::POST, "/login").json(serde_json::json!({"email": "a@b.com"})))
            .await
            .unwrap();
        assert_eq!(body, serde_json::json!({"id": "u1"}));
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let body = transport
            .send(request(&server, Method::POST, "/logout"))
            .await
            .unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_error_body_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/password_reset"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "missing password reset token",
                "message": "You must specify a valid password reset token.",
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let err = transport
            .send(request(&server, Method::POST, "/password_reset"))
            .await
            .unwrap_err();
        match err {
            FloatError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.error.as_deref(), Some("missing password reset token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_credentialed_requests_replay_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc; Path=/")
                    .set_body_json(serde_json::json!({"id": "u1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/score"))
            .and(wiremock::matchers::header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"score": 700})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        transport
            .send(request(&server, Method::POST, "/login").with_credentials(true))
            .await
            .unwrap();
        let score = transport
            .send(request(&server, Method::GET, "/score").with_credentials(true))
            .await
            .unwrap();
        assert_eq!(score["score"], 700);
    }
}
