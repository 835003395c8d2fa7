//! HTTP transport seam for the data-access clients
//!
//! Every service in this crate depends on the single `get JSON with query
//! parameters` capability expressed by [`Transport`]; any HTTP client that
//! satisfies it is interchangeable. [`HttpTransport`] is the reqwest-backed
//! production implementation.

use async_trait::async_trait;
use patholab_common::ApiConfig;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "patholab/0.1.0";

/// Transport errors, classified by the failure the caller has to react to
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl TransportError {
    /// HTTP status carried by the failure, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api(status, _) => Some(*status),
            _ => None,
        }
    }

    /// Absence of a collection is a valid state, not a failure
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Server-supplied message, when the error body carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Api(_, message) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Minimal GET-JSON capability the data-access layer consumes
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET against `path` (relative to the configured base URL)
    /// with the given query parameters and return the parsed JSON body
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError>;
}

/// Production transport over reqwest
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let url = self.url_for(path);

        tracing::debug!(url = %url, params = ?params, "GET");

        let mut request = self.http_client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(TransportError::Api(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// The backend has answered with `{"message": ...}`, `{"detail": ...}` and
/// plain-text bodies over its lifetime; `message` wins over `detail`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "detail"] {
        match value.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(v) if !v.is_null() => return Some(v.to_string()),
            _ => {}
        }
    }
    None
}
