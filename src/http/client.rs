//! HTTP client adapter for the service under test
//!
//! Every HTTP status the service returns is data: a 400 or a 500 comes back
//! as an [`HttpResponse`] like any 200 would. Only failures to complete the
//! exchange at all surface as errors, and those are classified so that a
//! wrong address reads differently from a generic request problem.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Url;
use serde_json::Value;

use crate::common::config::TOKEN_VAR;
use crate::common::{Config, Error, Result};

/// Upper bound for a single request, connect through body
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Path and query of a GET request, relative to the base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RequestSpec {
    /// Request for `path` without query parameters
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter; values are URL-encoded when sent
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Status and decoded body of a completed exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON, or the raw text as a JSON string when it isn't JSON
    pub body: Value,
}

impl HttpResponse {
    pub(crate) fn from_text(status: u16, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self { status, body }
    }
}

/// Something that can perform a GET against the service under test
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &RequestSpec) -> Result<HttpResponse>;
}

/// Production transport backed by a single reused `reqwest::Client`
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build the client for a resolved configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("api-e2e"));

        if let Some(token) = &config.auth_token {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    Error::InvalidEnv {
                        name: TOKEN_VAR,
                        value: "<redacted>".to_string(),
                        reason: e.to_string(),
                    }
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let inner = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            inner,
            base_url: config.base_url.clone(),
        })
    }

    /// Base address requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a request, keeping any path prefix of the base address
    pub fn endpoint(&self, request: &RequestSpec) -> Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        url.set_path(&path);

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }

        url
    }

    /// Map a reqwest failure onto the transport taxonomy and log it
    fn classify(&self, url: &Url, error: reqwest::Error) -> Error {
        let target = self.base_url().as_str().trim_end_matches('/');

        if error.is_connect() {
            tracing::error!("Connection error when reaching {}: {}", target, error);
            Error::ConnectionFailed {
                url: target.to_string(),
                source: error,
            }
        } else if error.is_timeout() {
            tracing::error!("Request error: {} timed out: {}", url, error);
            Error::Timeout {
                url: url.to_string(),
                millis: REQUEST_TIMEOUT.as_millis() as u64,
                source: error,
            }
        } else {
            tracing::error!("Request error: {}", error);
            Error::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, request: &RequestSpec) -> Result<HttpResponse> {
        let url = self.endpoint(request);
        tracing::debug!(%url, "GET");

        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify(&url, e))?;

        tracing::debug!(status, body = %text, "response");
        Ok(HttpResponse::from_text(status, text))
    }
}
