//! HTTP transport capability.
//!
//! Connector cores depend on this narrow seam instead of a concrete HTTP
//! client; [`HttpTransport`] is the reqwest-backed production
//! implementation.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{ConnectorError, ConnectorResult};
use crate::retry::RetryPolicy;

/// The capability a connector needs from its HTTP layer.
///
/// Implementations own authentication, connection reuse, timeouts, and the
/// bounded retry of transient failures; callers treat every returned error
/// as terminal for the current invocation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given query parameters, expecting a JSON body.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ConnectorResult<Value>;

    /// POST a JSON body to `url`.
    async fn post(&self, url: &str, body: &Value) -> ConnectorResult<Value>;

    /// PATCH a JSON body onto `url`.
    async fn patch(&self, url: &str, body: &Value) -> ConnectorResult<Value>;
}

/// reqwest-backed [`Transport`].
///
/// Credentials are applied per variant: basic auth as the standard
/// `Authorization` header, API keys as an `api_key` query parameter.
/// GETs are retried under the [`RetryPolicy`] for transient failures;
/// writes are never retried.
pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Build a transport with the given credentials and request timeout.
    pub fn new(credentials: Credentials, timeout: Duration) -> ConnectorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nimbus-connector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ConnectorError::invalid_configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            credentials,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn apply_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Basic { email, password } => builder.basic_auth(email, Some(password)),
            Credentials::ApiKey { key } => builder.query(&[("api_key", key.as_str())]),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ConnectorResult<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ConnectorError::Transport {
                status: status.as_u16(),
                detail: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ConnectorError::parse(format!("invalid JSON response: {e}")))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("credentials", &self.credentials)
            .field("retry", &self.retry)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ConnectorResult<Value> {
        self.retry
            .execute("get", || {
                debug!("GET {}", url);
                let builder = self
                    .apply_auth(self.client.get(url))
                    .query(query)
                    .header(header::ACCEPT, "application/json");
                self.send(builder)
            })
            .await
    }

    // Writes are single-attempt: a failed create or update is terminal for
    // the invocation.

    async fn post(&self, url: &str, body: &Value) -> ConnectorResult<Value> {
        debug!("POST {}", url);
        let builder = self
            .apply_auth(self.client.post(url))
            .header(header::ACCEPT, "application/json")
            .json(body);
        self.send(builder).await
    }

    async fn patch(&self, url: &str, body: &Value) -> ConnectorResult<Value> {
        debug!("PATCH {}", url);
        let builder = self
            .apply_auth(self.client.patch(url))
            .header(header::ACCEPT, "application/json")
            .json(body);
        self.send(builder).await
    }
}
